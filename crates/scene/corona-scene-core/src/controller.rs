//! SceneController: lifecycle state machine tying the timeline, the particle
//! field and the light rig to host events.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use corona_particles_core::{FieldConstants, ParticleField, Point3};
use corona_timeline_core::TimelineSynchronizer;

use crate::config::{SceneConfig, Viewport};
use crate::controllers::{FieldController, TimelineController};
use crate::diagnostics::SetupReport;
use crate::error::SceneError;
use crate::external::{EventSource, LoadedScene, Renderer, SceneLoader, SubscriptionId, SubscriptionKind};
use crate::lights::{self, NodeIndex, PointLight};
use crate::scheduler::{self, Pass};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneState {
    Unloaded,
    Loading,
    Ready,
    Active,
    Teardown,
}

#[derive(Debug)]
pub struct SceneController {
    pub(crate) config: SceneConfig,
    state: SceneState,
    pub(crate) timeline: TimelineController,
    pub(crate) particles: FieldController,
    pub(crate) lights: Vec<PointLight>,
    pub(crate) viewport: Viewport,
    subscriptions: Vec<SubscriptionId>,
}

impl SceneController {
    /// Validate `config` and create an `Unloaded` controller.
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        let constants = config.validate()?;
        Ok(Self {
            timeline: TimelineController::default(),
            particles: FieldController::inert(constants, config.initial_anchor),
            lights: Vec::new(),
            viewport: config.viewport,
            subscriptions: Vec::new(),
            state: SceneState::Unloaded,
            config,
        })
    }

    fn transition(&mut self, allowed_from: SceneState, to: SceneState) -> Result<(), SceneError> {
        if self.state != allowed_from {
            return Err(SceneError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        info!("scene {:?} -> {:?}", self.state, to);
        self.state = to;
        Ok(())
    }

    /// `Unloaded -> Loading`. The asset itself is fetched by the host.
    pub fn begin_load(&mut self, asset_path: &str) -> Result<(), SceneError> {
        self.transition(SceneState::Unloaded, SceneState::Loading)?;
        debug!("loading scene asset '{asset_path}'");
        Ok(())
    }

    /// Build timeline, field, anchor and light rig from a loaded scene.
    ///
    /// Fatal problems return an error and leave the controller `Loading`
    /// with nothing replaced. Recoverable ones are collected in the report
    /// and the scene becomes `Ready` with the affected feature disabled.
    pub fn finish_load(&mut self, loaded: LoadedScene) -> Result<SetupReport, SceneError> {
        if self.state != SceneState::Loading {
            return Err(SceneError::InvalidTransition {
                from: self.state,
                to: SceneState::Ready,
            });
        }
        let mut report = SetupReport::default();
        let index = NodeIndex::build(&loaded.nodes);

        let timeline = TimelineController::load(
            &self.config.timeline,
            loaded.tracks,
            self.config.camera_track.as_deref(),
            &mut report,
        )?;

        let anchor = match self.config.anchor_node.as_deref() {
            Some(name) => index.position(name).unwrap_or_else(|| {
                report.warn(SceneError::asset_missing(name));
                self.config.initial_anchor
            }),
            None => self.config.initial_anchor,
        };

        let particles = FieldController::load(
            &self.config,
            self.particles.constants().clone(),
            &loaded.base_samples,
            anchor,
            &mut report,
        )?;

        let lights = match lights::resolve_rig(&self.config.lights, &index) {
            Ok(rig) => rig,
            Err(err) => {
                report.warn(err);
                Vec::new()
            }
        };
        report.lights_enabled = !lights.is_empty();

        self.timeline = timeline;
        self.particles = particles;
        self.lights = lights;
        self.transition(SceneState::Loading, SceneState::Ready)?;
        Ok(report)
    }

    /// `begin_load`, then the loader, then `finish_load`.
    ///
    /// A loader error propagates and leaves the controller `Loading`.
    pub fn load_with(
        &mut self,
        loader: &mut dyn SceneLoader,
        asset_path: &str,
    ) -> Result<SetupReport, SceneError> {
        self.begin_load(asset_path)?;
        let loaded = loader.load(asset_path)?;
        self.finish_load(loaded)
    }

    /// `Ready -> Active`: subscribe to progress, frame and resize events.
    pub fn activate(&mut self, source: &mut dyn EventSource) -> Result<(), SceneError> {
        self.transition(SceneState::Ready, SceneState::Active)?;
        for kind in [
            SubscriptionKind::Progress,
            SubscriptionKind::FrameTick,
            SubscriptionKind::Resize,
        ] {
            self.subscriptions.push(source.subscribe(kind));
        }
        Ok(())
    }

    /// Drive every track from `p` and recompute the field; submits one frame.
    /// Ignored unless `Active`.
    pub fn on_progress(&mut self, p: f32, renderer: &mut dyn Renderer) {
        if self.state != SceneState::Active {
            debug!("on_progress({p}) ignored in {:?}", self.state);
            return;
        }
        scheduler::run_pass(self, Pass::Progress(p), renderer);
    }

    /// Render-loop tick with the anchor's current position; submits one frame.
    ///
    /// Outside `Active` nothing is submitted, though a `Ready` scene still
    /// records the anchor for its first frame.
    pub fn tick(&mut self, anchor: Point3, renderer: &mut dyn Renderer) {
        match self.state {
            SceneState::Active => scheduler::run_pass(self, Pass::Tick(anchor), renderer),
            SceneState::Ready => self.particles.set_anchor(anchor),
            state => debug!("tick ignored in {state:?}"),
        }
    }

    /// Record the surface size; later frames carry the new aspect.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport { width, height };
    }

    /// Move to `Teardown`: drop every subscription, then release buffers.
    ///
    /// Valid from any state; repeated calls do nothing.
    pub fn dispose(&mut self, source: &mut dyn EventSource) {
        if self.state == SceneState::Teardown {
            return;
        }
        for id in self.subscriptions.drain(..) {
            source.unsubscribe(id);
        }
        self.particles.release();
        self.timeline.release();
        self.lights.clear();
        info!("scene {:?} -> {:?}", self.state, SceneState::Teardown);
        self.state = SceneState::Teardown;
    }

    #[inline]
    pub fn state(&self) -> SceneState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[inline]
    pub fn timeline(&self) -> &TimelineSynchronizer {
        self.timeline.synchronizer()
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        self.particles.field()
    }

    #[inline]
    pub fn constants(&self) -> &FieldConstants {
        self.particles.constants()
    }

    #[inline]
    pub fn anchor(&self) -> Point3 {
        self.particles.anchor()
    }

    #[inline]
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Subscriptions currently held.
    #[inline]
    pub fn subscriptions(&self) -> &[SubscriptionId] {
        &self.subscriptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = SceneConfig {
            jitter_amplitude: f32::NAN,
            ..SceneConfig::default()
        };
        assert!(matches!(
            SceneController::new(cfg),
            Err(SceneError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn finish_load_requires_loading() {
        let mut scene = SceneController::new(SceneConfig::default()).unwrap();
        let err = scene.finish_load(LoadedScene::default()).unwrap_err();
        assert_eq!(
            err,
            SceneError::InvalidTransition {
                from: SceneState::Unloaded,
                to: SceneState::Ready
            }
        );
    }

    #[test]
    fn begin_load_twice_is_invalid() {
        let mut scene = SceneController::new(SceneConfig::default()).unwrap();
        scene.begin_load("scene.glb").unwrap();
        assert!(matches!(
            scene.begin_load("scene.glb"),
            Err(SceneError::InvalidTransition {
                from: SceneState::Loading,
                to: SceneState::Loading
            })
        ));
    }
}
