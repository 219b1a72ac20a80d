use image::{Rgba, RgbaImage};

use super::*;
use crate::assets::decode::asset_from_rgba;
use crate::foundation::error::AppError;
use crate::persist::repository::MemoryRepository;
use crate::session::model::AspectRatio;

struct BrokenRepository;

impl Repository for BrokenRepository {
    fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::storage("disk on fire"))
    }
    fn set(&mut self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::storage("disk on fire"))
    }
    fn remove(&mut self, _key: &str) -> AppResult<()> {
        Err(AppError::storage("disk on fire"))
    }
    fn clear(&mut self) -> AppResult<()> {
        Err(AppError::storage("disk on fire"))
    }
}

#[test]
fn empty_store_restores_defaults() {
    let store = SessionStore::new(MemoryRepository::new());
    let r = store.restore();
    assert!(r.image.is_none());
    assert!(r.logo.is_none());
    assert_eq!(r.effects, EffectParams::default());
    assert_eq!(r.logo_position, None);
    assert_eq!(r.logo_scale, 1.0);
}

#[test]
fn effects_round_trip() {
    let mut store = SessionStore::new(MemoryRepository::new());
    let fx = EffectParams::new(0.65, 0.4, AspectRatio::Ratio { w: 9, h: 16 });
    store.save_effects(&fx).unwrap();
    assert_eq!(store.restore().effects, fx);
}

#[test]
fn corrupt_entries_fall_back_to_defaults() {
    let mut repo = MemoryRepository::new();
    repo.set(KEY_EFFECTS, "{not json").unwrap();
    repo.set(KEY_LOGO_POSITION, "[1,2").unwrap();
    repo.set(KEY_LOGO_SCALE, "big").unwrap();
    repo.set(KEY_IMAGE, "data:image/png;base64,AAAA").unwrap();
    let store = SessionStore::new(repo);

    let r = store.restore();
    assert_eq!(r.effects, EffectParams::default());
    assert_eq!(r.logo_position, None);
    assert_eq!(r.logo_scale, 1.0);
    assert!(r.image.is_none());
}

#[test]
fn read_failures_restore_defaults() {
    let r = SessionStore::new(BrokenRepository).restore();
    assert_eq!(r.effects, EffectParams::default());
    assert!(r.image.is_none());
}

#[test]
fn write_failures_surface_as_storage_errors() {
    let mut store = SessionStore::new(BrokenRepository);
    assert!(matches!(
        store.save_logo_scale(1.0),
        Err(AppError::Storage(_))
    ));
    assert!(store.save_effects(&EffectParams::default()).is_err());
}

#[test]
fn position_scale_and_assets_round_trip() {
    let mut store = SessionStore::new(MemoryRepository::new());
    let img = asset_from_rgba(RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]))).unwrap();

    store.save_image(Some(&img)).unwrap();
    store.save_logo(Some(&img)).unwrap();
    store.save_logo_position(Point::new(840.0, 677.5)).unwrap();
    store.save_logo_scale(1.3).unwrap();

    let r = store.restore();
    assert_eq!(r.image.unwrap().size(), img.size());
    assert!(r.logo.is_some());
    assert_eq!(r.logo_position, Some(Point::new(840.0, 677.5)));
    assert_eq!(r.logo_scale, 1.3);

    store.save_logo(None).unwrap();
    assert!(store.restore().logo.is_none());
    assert_eq!(store.repo().get(KEY_LOGO_SCALE).unwrap().as_deref(), Some("1.3"));
}

#[test]
fn stored_scale_is_normalized() {
    let mut repo = MemoryRepository::new();
    repo.set(KEY_LOGO_SCALE, "12").unwrap();
    assert_eq!(SessionStore::new(repo).restore().logo_scale, 3.0);
}

#[test]
fn clear_removes_all_session_keys() {
    let mut store = SessionStore::new(MemoryRepository::new());
    store.save_effects(&EffectParams::default()).unwrap();
    store.save_logo_scale(2.0).unwrap();
    store.clear().unwrap();
    assert!(store.into_repo().is_empty());
}
