use js_sys::{Float32Array, Function, Math, Object, Reflect};
use log::warn;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use corona_scene::{
    BloomSettings, EventSource, Frame, LoadedScene, PointLight, Renderer, SceneConfig,
    SceneController, SceneState, SubscriptionId, SubscriptionKind, TrackTime,
};

#[wasm_bindgen]
pub struct CoronaScene {
    core: SceneController,
    events: JsEvents,
    renderer: JsRenderer,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn kind_name(kind: SubscriptionKind) -> &'static str {
    match kind {
        SubscriptionKind::Progress => "progress",
        SubscriptionKind::FrameTick => "frame",
        SubscriptionKind::Resize => "resize",
    }
}

/// Subscription bookkeeping, optionally mirrored to JS hooks.
///
/// `subscribe(kind: string) -> number` may return its own id; anything else
/// falls back to a local counter. `unsubscribe(id: number)` is called on dispose.
#[derive(Default)]
struct JsEvents {
    next: u32,
    on_subscribe: Option<Function>,
    on_unsubscribe: Option<Function>,
}

impl EventSource for JsEvents {
    fn subscribe(&mut self, kind: SubscriptionKind) -> SubscriptionId {
        let local = SubscriptionId(self.next);
        self.next += 1;
        let Some(f) = &self.on_subscribe else {
            return local;
        };
        match f.call1(&JsValue::UNDEFINED, &JsValue::from_str(kind_name(kind))) {
            Ok(val) => val.as_f64().and_then(host_subscription_id).unwrap_or(local),
            Err(err) => {
                warn!("subscribe hook threw: {err:?}");
                local
            }
        }
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        if let Some(f) = &self.on_unsubscribe {
            if let Err(err) = f.call1(&JsValue::UNDEFINED, &JsValue::from(id.0)) {
                warn!("unsubscribe hook threw: {err:?}");
            }
        }
    }
}

/// Accept a host-issued id only when it is an integer that fits a u32.
fn host_subscription_id(n: f64) -> Option<SubscriptionId> {
    (n.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&n)).then(|| SubscriptionId(n as u32))
}

/// Everything in a frame besides the bulk buffers.
#[derive(Serialize)]
struct FrameMeta<'a> {
    anchor: [f32; 3],
    aspect: f32,
    bloom: BloomSettings,
    lights: &'a [PointLight],
    dirty: bool,
}

fn track_times_object(times: &[TrackTime]) -> Object {
    let obj = Object::new();
    for t in times {
        // Reflect::set only fails on frozen or proxy targets.
        let _ = Reflect::set(&obj, &JsValue::from_str(&t.name), &JsValue::from(t.time));
    }
    obj
}

/// Calls `render(positions, scales, trackTimes, meta)` once per frame.
#[derive(Default)]
struct JsRenderer {
    f: Option<Function>,
}

impl Renderer for JsRenderer {
    fn submit(&mut self, frame: &Frame<'_>) {
        let Some(f) = &self.f else {
            return;
        };
        let meta = FrameMeta {
            anchor: frame.anchor.to_array(),
            aspect: frame.aspect,
            bloom: frame.bloom,
            lights: frame.lights,
            dirty: frame.buffers_dirty,
        };
        let meta = swb::to_value(&meta).unwrap_or(JsValue::NULL);
        let args = js_sys::Array::of4(
            &Float32Array::from(frame.positions),
            &Float32Array::from(frame.scales),
            &track_times_object(frame.track_times),
            &meta,
        );
        if let Err(err) = f.apply(&JsValue::UNDEFINED, &args) {
            warn!("render callback threw: {err:?}");
        }
    }
}

#[wasm_bindgen]
impl CoronaScene {
    /// Create a scene. Pass a SceneConfig object or undefined/null for defaults.
    /// Example:
    ///   new CoronaScene({ field: "halo", seed: 7 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CoronaScene, JsError> {
        console_error_panic_hook::set_once();

        let mut cfg: SceneConfig = if jsvalue_is_undefined_or_null(&config) {
            SceneConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        if cfg.seed.is_none() {
            cfg.seed = Some((Math::random() * (1u64 << 53) as f64) as u64);
        }

        let core = SceneController::new(cfg).map_err(|e| JsError::new(&format!("config error: {e}")))?;
        Ok(CoronaScene {
            core,
            events: JsEvents::default(),
            renderer: JsRenderer::default(),
        })
    }

    /// Finish loading from a parsed scene object `{ tracks, base_samples, nodes }`.
    /// Returns the setup report (warnings for anything that was switched off).
    #[wasm_bindgen]
    pub fn load(&mut self, scene: JsValue) -> Result<JsValue, JsError> {
        if jsvalue_is_undefined_or_null(&scene) {
            return Err(JsError::new("load: scene is null/undefined"));
        }
        let loaded: LoadedScene =
            swb::from_value(scene).map_err(|e| JsError::new(&format!("load parse error: {e}")))?;
        self.finish(loaded)
    }

    /// Same as `load`, from a JSON string.
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&mut self, text: &str) -> Result<JsValue, JsError> {
        let loaded = LoadedScene::from_json(text).map_err(|e| JsError::new(&e.to_string()))?;
        self.finish(loaded)
    }

    /// Set the per-frame callback
    /// `(positions: Float32Array, scales: Float32Array, trackTimes: object, meta: object) => void`.
    #[wasm_bindgen(js_name = setRenderer)]
    pub fn set_renderer(&mut self, render: Function) {
        self.renderer.f = Some(render);
    }

    /// Optional hooks mirroring subscription changes into the host.
    #[wasm_bindgen(js_name = setEventHooks)]
    pub fn set_event_hooks(&mut self, subscribe: Function, unsubscribe: Function) {
        self.events.on_subscribe = Some(subscribe);
        self.events.on_unsubscribe = Some(unsubscribe);
    }

    #[wasm_bindgen]
    pub fn activate(&mut self) -> Result<(), JsError> {
        self.core
            .activate(&mut self.events)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = onProgress)]
    pub fn on_progress(&mut self, p: f32) {
        self.core.on_progress(p, &mut self.renderer);
    }

    /// Render-loop tick with the camera (anchor) position.
    #[wasm_bindgen]
    pub fn tick(&mut self, x: f32, y: f32, z: f32) {
        self.core
            .tick(corona_scene::Point3::new(x, y, z), &mut self.renderer);
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.core.resize(width, height);
    }

    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.core.dispose(&mut self.events);
    }

    /// Current lifecycle state: "Unloaded" | "Loading" | "Ready" | "Active" | "Teardown".
    #[wasm_bindgen]
    pub fn state(&self) -> String {
        format!("{:?}", self.core.state())
    }

    /// Track name -> playback time.
    #[wasm_bindgen(js_name = trackTimes)]
    pub fn track_times(&self) -> JsValue {
        track_times_object(self.core.timeline().track_times()).into()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.core.field().len()
    }
}

impl CoronaScene {
    /// A failed load leaves the controller `Loading`, so a retry skips `begin_load`.
    fn finish(&mut self, loaded: LoadedScene) -> Result<JsValue, JsError> {
        if self.core.state() == SceneState::Unloaded {
            self.core
                .begin_load("inline")
                .map_err(|e| JsError::new(&e.to_string()))?;
        }
        let report = self
            .core
            .finish_load(loaded)
            .map_err(|e| JsError::new(&e.to_string()))?;
        swb::to_value(&report).map_err(|e| JsError::new(&format!("report error: {e}")))
    }
}

/// ABI guard for JS wrappers.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
