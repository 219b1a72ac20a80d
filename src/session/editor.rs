use crate::assets::decode::{ImageAsset, ImageKind, decode_upload};
use crate::foundation::{
    core::{Point, Rect, Size},
    error::{AppError, AppResult},
};
use crate::persist::{repository::Repository, store::SessionStore};
use crate::render::{
    compositor::{Compositor, CompositorOpts, Raster},
    encode::{ExportFormat, encode},
};
use crate::session::model::{EffectParams, LogoTransform, Session};
use crate::watermark::placer::{WatermarkPlacer, clamp_position};

/// Editor configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct EditorOpts {
    /// Compositor tunables.
    pub compositor: CompositorOpts,
}

/// Which slot a pending decode will fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadTarget {
    /// The photo.
    Source,
    /// The watermark logo.
    Logo,
}

/// Handle for one in-flight decode.
///
/// Only the most recent ticket per [`LoadTarget`] is honoured on completion; older ones are
/// dropped so a slow decode cannot overwrite a newer choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeTicket {
    target: LoadTarget,
    generation: u64,
}

impl DecodeTicket {
    /// Slot this decode targets.
    pub fn target(&self) -> LoadTarget {
        self.target
    }
}

/// Encoded output ready to be offered as a download.
#[derive(Clone, Debug)]
pub struct Export {
    /// Suggested file name.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// Encoded image.
    pub bytes: Vec<u8>,
}

/// Event-driven owner of one editing [`Session`].
///
/// Every state change marks the frame dirty; [`Editor::redraw`] renders at most once per batch
/// of changes. State is mirrored into the [`SessionStore`] as it changes.
#[derive(Debug)]
pub struct Editor<R: Repository> {
    session: Session,
    placer: WatermarkPlacer,
    compositor: Compositor,
    store: SessionStore<R>,
    source_generation: u64,
    logo_generation: u64,
    needs_redraw: bool,
    frame: Option<Raster>,
    loaded: bool,
}

impl<R: Repository> Editor<R> {
    /// Restore the last session from `repo` and start editing.
    pub fn open(repo: R, opts: EditorOpts) -> Self {
        let store = SessionStore::new(repo);
        let restored = store.restore();

        let placer = WatermarkPlacer::new(
            LogoTransform {
                position: restored.logo_position.unwrap_or(Point::ZERO),
                scale: restored.logo_scale,
            },
            restored.logo_position.is_some(),
        );
        let session = Session {
            source: restored.image,
            logo: restored.logo,
            effects: restored.effects,
            logo_transform: placer.transform(),
        };

        let mut editor = Self {
            needs_redraw: session.source.is_some(),
            session,
            placer,
            compositor: Compositor::new(opts.compositor),
            store,
            source_generation: 0,
            logo_generation: 0,
            frame: None,
            loaded: false,
        };
        if restored.logo_position.is_none() {
            editor.place_logo_default();
        } else {
            editor.clamp_logo();
        }
        editor.loaded = true;
        tracing::debug!(
            source = editor.session.source.is_some(),
            logo = editor.session.logo.is_some(),
            "editor opened"
        );
        editor
    }

    /// Current committed session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Watermark placement state.
    pub fn placer(&self) -> &WatermarkPlacer {
        &self.placer
    }

    /// Persistence layer.
    pub fn store(&self) -> &SessionStore<R> {
        &self.store
    }

    /// Stop editing and hand back the repository.
    pub fn into_repo(self) -> R {
        self.store.into_repo()
    }

    /// Reserve a decode slot for a new photo.
    pub fn begin_source_load(&mut self) -> DecodeTicket {
        self.source_generation += 1;
        DecodeTicket {
            target: LoadTarget::Source,
            generation: self.source_generation,
        }
    }

    /// Reserve a decode slot for a new logo.
    pub fn begin_logo_load(&mut self) -> DecodeTicket {
        self.logo_generation += 1;
        DecodeTicket {
            target: LoadTarget::Logo,
            generation: self.logo_generation,
        }
    }

    /// Deliver a decoded photo. Returns `false` when the ticket is stale or decoding failed;
    /// the session is unchanged in both cases.
    pub fn complete_source_load(
        &mut self,
        ticket: DecodeTicket,
        decoded: AppResult<ImageAsset>,
    ) -> bool {
        if ticket.target != LoadTarget::Source || ticket.generation != self.source_generation {
            tracing::debug!(?ticket, "dropping stale source decode");
            return false;
        }
        let asset = match decoded {
            Ok(a) => a,
            Err(e) => {
                tracing::warn!(error = %e, "source image decode failed");
                return false;
            }
        };

        self.session.source = Some(asset);
        if self.loaded {
            let r = self.store.save_image(self.session.source.as_ref());
            log_store_err("image", r);
        }
        self.place_logo_default();
        self.needs_redraw = true;
        true
    }

    /// Deliver a decoded logo. A first logo gets the default placement; swapping one logo for
    /// another keeps the current position.
    pub fn complete_logo_load(
        &mut self,
        ticket: DecodeTicket,
        decoded: AppResult<ImageAsset>,
    ) -> bool {
        if ticket.target != LoadTarget::Logo || ticket.generation != self.logo_generation {
            tracing::debug!(?ticket, "dropping stale logo decode");
            return false;
        }
        let asset = match decoded {
            Ok(a) => a,
            Err(e) => {
                tracing::warn!(error = %e, "logo decode failed");
                return false;
            }
        };

        let first_logo = self.session.logo.is_none();
        self.session.logo = Some(asset);
        if self.loaded {
            let r = self.store.save_logo(self.session.logo.as_ref());
            log_store_err("logo", r);
        }
        if first_logo {
            self.place_logo_default();
        } else {
            self.clamp_logo();
        }
        self.needs_redraw = true;
        true
    }

    /// Validate and decode an uploaded photo.
    ///
    /// Unsupported types fail with [`AppError::UnsupportedType`] before anything changes;
    /// otherwise returns whether the photo was applied.
    pub fn load_source(&mut self, bytes: &[u8], mime: &str) -> AppResult<bool> {
        ImageKind::from_mime(mime)?;
        let ticket = self.begin_source_load();
        Ok(self.complete_source_load(ticket, decode_upload(bytes, mime)))
    }

    /// Validate and decode an uploaded logo. See [`Editor::load_source`].
    pub fn load_logo(&mut self, bytes: &[u8], mime: &str) -> AppResult<bool> {
        ImageKind::from_mime(mime)?;
        let ticket = self.begin_logo_load();
        Ok(self.complete_logo_load(ticket, decode_upload(bytes, mime)))
    }

    /// Set an already-decoded logo, or remove it with `None`. Re-selecting the current logo is a
    /// no-op.
    pub fn set_logo(&mut self, logo: Option<ImageAsset>) {
        match logo {
            Some(asset)
                if self
                    .session
                    .logo
                    .as_ref()
                    .is_some_and(|cur| cur.same_source(&asset)) => {}
            Some(asset) => {
                let ticket = self.begin_logo_load();
                self.complete_logo_load(ticket, Ok(asset));
            }
            None => self.clear_logo(),
        }
    }

    /// Remove the logo. Pending logo decodes are invalidated.
    pub fn clear_logo(&mut self) {
        self.logo_generation += 1;
        if self.session.logo.take().is_none() {
            return;
        }
        if self.loaded {
            let r = self.store.save_logo(None);
            log_store_err("logo", r);
        }
        self.needs_redraw = true;
    }

    /// Remove the photo. Pending photo decodes are invalidated and the frame is dropped.
    pub fn clear_source(&mut self) {
        self.source_generation += 1;
        if self.session.source.take().is_none() {
            return;
        }
        let r = self.store.save_image(None);
        log_store_err("image", r);
        self.frame = None;
        self.needs_redraw = true;
    }

    /// Forget everything: default effects and transform, no photo or logo, empty store.
    pub fn reset(&mut self) {
        self.source_generation += 1;
        self.logo_generation += 1;
        self.session = Session::default();
        self.placer = WatermarkPlacer::default();
        self.frame = None;
        self.needs_redraw = true;
        let r = self.store.clear();
        log_store_err("session", r);
    }

    /// Replace the effect parameters.
    pub fn set_effects(&mut self, effects: EffectParams) {
        if self.session.effects == effects {
            return;
        }
        self.session.effects = effects;
        if self.loaded {
            let r = self.store.save_effects(&self.session.effects);
            log_store_err("effects", r);
        }
        if self.placer.has_custom_position() {
            self.clamp_logo();
        } else {
            self.place_logo_default();
        }
        self.needs_redraw = true;
    }

    /// Set the logo scale (rounded to one decimal, clamped to `[0.2, 3.0]`).
    pub fn set_logo_scale(&mut self, scale: f64) -> f64 {
        let scale = self.placer.set_scale(scale);
        self.commit_scale(scale)
    }

    /// Step the logo scale by 0.2 up or down.
    pub fn step_logo_scale(&mut self, up: bool) -> f64 {
        let scale = self.placer.step_scale(up);
        self.commit_scale(scale)
    }

    /// Logo bounds at the position currently drawn, in raster pixels.
    pub fn logo_rect(&self) -> Option<Rect> {
        let (dest, logo) = self.logo_geometry()?;
        let pos = clamp_position(self.placer.live_position(), dest, logo);
        Some(Rect::from_origin_size(pos, logo))
    }

    /// Pointer pressed at `pointer` (raster pixels). Returns `true` if a drag started.
    pub fn pointer_down(&mut self, pointer: Point) -> bool {
        let Some(rect) = self.logo_rect() else {
            return false;
        };
        self.placer.pointer_down(pointer, rect)
    }

    /// Pointer moved. Returns `true` if the live logo position changed.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        if !self.placer.is_dragging() {
            return false;
        }
        let Some((dest, logo)) = self.logo_geometry() else {
            return false;
        };
        let before = self.placer.live_position();
        let moved = self
            .placer
            .pointer_move(pointer, dest, logo)
            .is_some_and(|p| p != before);
        if moved {
            self.needs_redraw = true;
        }
        moved
    }

    /// Pointer released; commits and persists the dragged position.
    pub fn pointer_up(&mut self) -> bool {
        let Some(transform) = self.placer.pointer_up() else {
            return false;
        };
        self.session.logo_transform = transform;
        let r = self.store.save_logo_position(transform.position);
        log_store_err("logo position", r);
        self.needs_redraw = true;
        true
    }

    /// Place the logo at `pos` without a drag. Returns the clamped position, or `None` when
    /// there is no photo or no logo.
    pub fn set_logo_position(&mut self, pos: Point) -> Option<Point> {
        let (dest, logo) = self.logo_geometry()?;
        let pos = self.placer.set_position(pos, dest, logo);
        self.session.logo_transform.position = pos;
        let r = self.store.save_logo_position(pos);
        log_store_err("logo position", r);
        self.needs_redraw = true;
        Some(pos)
    }

    /// Whether state changed since the last [`Editor::redraw`].
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Re-render if anything changed and return the latest good frame.
    ///
    /// A failed render is logged and the previous frame is kept.
    pub fn redraw(&mut self) -> Option<&Raster> {
        if self.needs_redraw {
            self.needs_redraw = false;
            if self.session.source.is_none() {
                self.frame = None;
                return None;
            }
            let mut view = self.session.clone();
            view.logo_transform.position = self.placer.live_position();
            match self.compositor.render(&view) {
                Ok(frame) => self.frame = Some(frame),
                Err(e) => tracing::warn!(error = %e, "render skipped"),
            }
        }
        self.frame.as_ref()
    }

    /// Latest good frame without re-rendering.
    pub fn frame(&self) -> Option<&Raster> {
        self.frame.as_ref()
    }

    /// Encode the current frame for download.
    pub fn export(&mut self, format: ExportFormat) -> AppResult<Export> {
        let frame = self
            .redraw()
            .ok_or_else(|| AppError::validation("nothing to export: no rendered frame"))?;
        let bytes = encode(frame, format)?;
        tracing::info!(
            file = %format.file_name(),
            bytes = bytes.len(),
            "exported frame"
        );
        Ok(Export {
            file_name: format.file_name(),
            mime: format.mime(),
            bytes,
        })
    }

    fn commit_scale(&mut self, scale: f64) -> f64 {
        if self.session.logo_transform.scale != scale {
            self.session.logo_transform.scale = scale;
            self.needs_redraw = true;
        }
        let r = self.store.save_logo_scale(scale);
        log_store_err("logo scale", r);
        self.clamp_logo();
        scale
    }

    /// Destination raster size and rendered logo size, when both exist.
    fn logo_geometry(&self) -> Option<(Size, Size)> {
        let layout = self.compositor.layout(&self.session)?;
        let logo = layout.logo_size?;
        Some((layout.plan.dest_size.to_size(), logo))
    }

    fn place_logo_default(&mut self) {
        let Some((dest, logo)) = self.logo_geometry() else {
            return;
        };
        let pos = self.placer.reset_to_default(dest, logo);
        self.session.logo_transform.position = pos;
        let r = self.store.save_logo_position(pos);
        log_store_err("logo position", r);
    }

    // Geometry changed under a kept position: keep the logo on the raster.
    fn clamp_logo(&mut self) {
        let Some((dest, logo)) = self.logo_geometry() else {
            return;
        };
        if let Some(pos) = self.placer.clamp_into(dest, logo) {
            self.session.logo_transform.position = pos;
            let r = self.store.save_logo_position(pos);
            log_store_err("logo position", r);
            self.needs_redraw = true;
        }
    }
}

fn log_store_err(what: &str, r: AppResult<()>) {
    if let Err(e) = r {
        tracing::warn!(what, error = %e, "session store write failed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
