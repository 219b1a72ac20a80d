//! aisaidso turns a photo into a watermarked, tinted, cropped export.
//!
//! The pipeline is session-oriented:
//!
//! - Open an [`Editor`] over a [`Repository`] (the last session is restored from it)
//! - Feed it uploads, effect changes and pointer events
//! - Call [`Editor::redraw`] when [`Editor::needs_redraw`] is set, and [`Editor::export`] to get
//!   PNG or JPEG bytes
//!
//! The building blocks ([`apply_tint`], [`plan_crop`], [`Compositor`], [`WatermarkPlacer`],
//! [`SessionStore`]) are public for callers that want to drive rendering themselves.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod persist;
mod plan;
mod render;
mod session;
mod watermark;

pub use crate::assets::catalog::{LogoCatalog, LogoPreset};
pub use crate::assets::decode::{
    ImageAsset, ImageKind, asset_from_rgba, decode_image, decode_upload, from_data_uri,
    to_data_uri,
};
pub use crate::effects::composite::{StraightRgba8, over, overlay_in_place};
pub use crate::effects::tint::apply_tint;
pub use crate::foundation::core::{PixelRect, PixelSize, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{AppError, AppResult, UNSUPPORTED_UPLOAD_MESSAGE};
pub use crate::persist::repository::{FileRepository, MemoryRepository, Repository};
pub use crate::persist::store::{
    KEY_EFFECTS, KEY_IMAGE, KEY_LOGO, KEY_LOGO_POSITION, KEY_LOGO_SCALE, RestoredSession,
    SessionStore,
};
pub use crate::plan::crop::{CropPlan, plan_crop};
pub use crate::render::compositor::{Compositor, CompositorOpts, Raster, RenderLayout};
pub use crate::render::encode::{ExportFormat, JPEG_QUALITY, encode};
pub use crate::session::editor::{DecodeTicket, Editor, EditorOpts, Export, LoadTarget};
pub use crate::session::model::{
    AspectRatio, EffectParams, LogoTransform, MAX_LOGO_SCALE, MIN_LOGO_SCALE,
    MIN_RESOLUTION_SCALE, Session, normalize_logo_scale,
};
pub use crate::watermark::placer::{
    DragSession, EDGE_MARGIN, SCALE_STEP, WatermarkPlacer, clamp_position, default_position,
    hit_test,
};
pub use crate::watermark::viewport::{MAX_VIEWPORT_HEIGHT_FRACTION, Viewport};
