//! `wasm-bindgen` exports for browser hosts.
//!
//! Host-driven: JavaScript renders the bars, registers one position callback
//! per bar and per marker, and calls [`WebVisualizer::tick`] from
//! `requestAnimationFrame`. Tones go through WebAudio.
//!
//! Sinks run synchronously inside `tick`, `shuffle` and `abort`, while the
//! visualizer is mutably borrowed. A sink must not call back into the same
//! `WebVisualizer` (wasm-bindgen rejects that as recursive use of an
//! object); store the position and read `isRunning()` or `values()` after
//! the call returns.

use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{AudioContext, AudioScheduledSourceNode, OscillatorType};
use web_time::Instant;

use crate::audio::{Tone, ToneEmitter};
use crate::error::VisualizerError;
use crate::options::{ToneOptions, VisualizerOptions};
use crate::permutation::RandomPermutation;
use crate::sinks::Cursor;
use crate::sort::{ElementId, RunStatus, SortSession};

fn install_panic_hook() {
    console_error_panic_hook::set_once();
}

fn init_logging() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        if console_log::init_with_level(log::Level::Debug).is_err() {
            log::debug!("console logger already installed");
        }
    });
}

fn to_js(error: &VisualizerError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn tone_error(error: &JsValue) -> VisualizerError {
    VisualizerError::Tone(format!("{error:?}"))
}

/// Short sine beeps through a lazily created `AudioContext`.
struct WebAudioTones {
    options: ToneOptions,
    context: Option<AudioContext>,
}

impl WebAudioTones {
    fn new(options: ToneOptions) -> Self {
        Self {
            options,
            context: None,
        }
    }

    /// Browsers refuse audio before a user gesture, so the context is only
    /// created on the first cue (which follows the sort button press).
    fn context(&mut self) -> Result<&AudioContext, VisualizerError> {
        if self.context.is_none() {
            self.context = Some(AudioContext::new().map_err(|e| tone_error(&e))?);
        }
        self.context
            .as_ref()
            .ok_or_else(|| VisualizerError::Tone("no audio context".to_owned()))
    }
}

impl ToneEmitter for WebAudioTones {
    fn emit(&mut self, tone: Tone) -> Result<(), VisualizerError> {
        let frequency = self.options.frequency(tone) as f32;
        let gain = self.options.gain as f32;
        let length = self.options.duration_ms as f64 / 1000.0;
        let ctx = self.context()?;

        let oscillator = ctx.create_oscillator().map_err(|e| tone_error(&e))?;
        oscillator.set_type(OscillatorType::Sine);
        oscillator.frequency().set_value(frequency);
        let volume = ctx.create_gain().map_err(|e| tone_error(&e))?;
        volume.gain().set_value(gain);

        let _ = oscillator
            .connect_with_audio_node(&volume)
            .map_err(|e| tone_error(&e))?;
        let _ = volume
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| tone_error(&e))?;

        let start = ctx.current_time();
        let source: &AudioScheduledSourceNode = &oscillator;
        source.start_with_when(start).map_err(|e| tone_error(&e))?;
        source
            .stop_with_when(start + length)
            .map_err(|e| tone_error(&e))?;
        Ok(())
    }
}

/// Module entry point: panic hook and console logging.
#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
    init_logging();
}

/// Browser handle on one sorting board.
#[wasm_bindgen]
pub struct WebVisualizer {
    session: SortSession,
}

#[wasm_bindgen]
impl WebVisualizer {
    /// Board of `size` bars with default options.
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize) -> Result<WebVisualizer, JsValue> {
        let options = VisualizerOptions {
            size,
            ..VisualizerOptions::default()
        };
        Self::build(options)
    }

    /// Board configured from a TOML document (see the options schema).
    #[wasm_bindgen(js_name = fromToml)]
    pub fn from_toml(toml: &str) -> Result<WebVisualizer, JsValue> {
        let options = VisualizerOptions::from_toml_str(toml).map_err(|e| to_js(&e))?;
        Self::build(options)
    }

    fn build(options: VisualizerOptions) -> Result<Self, JsValue> {
        install_panic_hook();
        init_logging();
        let tones = WebAudioTones::new(options.tones.clone());
        let session =
            SortSession::new(options, RandomPermutation::new(), tones, Instant::now())
                .map_err(|e| to_js(&e))?;
        Ok(Self { session })
    }

    /// Register (or rebind) the position callback for bar `id`. The callback
    /// receives one number, the bar's x coordinate.
    ///
    /// The callback runs during `tick`, `shuffle` and `abort` and must not
    /// call any method on this visualizer.
    #[wasm_bindgen(js_name = registerBar)]
    pub fn register_bar(&mut self, id: usize, sink: Function) {
        self.session
            .sinks_mut()
            .register_element(ElementId(id), move |x| {
                if let Err(e) = sink.call1(&JsValue::NULL, &JsValue::from_f64(x)) {
                    log::warn!("bar #{id} sink threw: {e:?}");
                }
            });
    }

    /// Drop the callback for bar `id`, e.g. when its element unmounts.
    #[wasm_bindgen(js_name = unregisterBar)]
    pub fn unregister_bar(&mut self, id: usize) -> bool {
        self.session.sinks_mut().unregister_element(ElementId(id))
    }

    /// Register (or rebind) the callback for marker `"i"` or `"j"`.
    ///
    /// Same rule as `registerBar`: no calls back into this visualizer from
    /// inside the callback.
    #[wasm_bindgen(js_name = registerCursor)]
    pub fn register_cursor(&mut self, name: &str, sink: Function) -> Result<(), JsValue> {
        let cursor = match name {
            "i" => Cursor::I,
            "j" => Cursor::J,
            other => {
                return Err(JsValue::from_str(&format!(
                    "unknown cursor {other:?}, expected \"i\" or \"j\""
                )));
            }
        };
        self.session.sinks_mut().register_cursor(cursor, move |x| {
            if let Err(e) = sink.call1(&JsValue::NULL, &JsValue::from_f64(x)) {
                log::warn!("cursor {cursor} sink threw: {e:?}");
            }
        });
        Ok(())
    }

    /// New random order. Rejects while a sort is running.
    pub fn shuffle(&mut self) -> Result<(), JsValue> {
        self.session.shuffle().map_err(|e| to_js(&e))
    }

    /// Start sorting. The promise resolves when the run settles; read
    /// `status()` to tell a finished run from a failed or aborted one.
    #[wasm_bindgen(js_name = startSort)]
    pub fn start_sort(&mut self) -> Result<Promise, JsValue> {
        let completion = self
            .session
            .start_sort(Instant::now())
            .map_err(|e| to_js(&e))?;
        Ok(future_to_promise(async move {
            completion.await;
            Ok(JsValue::UNDEFINED)
        }))
    }

    /// Advance one frame. Call from `requestAnimationFrame`. Returns whether
    /// a sort is still running.
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        self.session.tick(Instant::now()).map_err(|e| to_js(&e))
    }

    /// Stop the current run where it stands.
    pub fn abort(&mut self) -> bool {
        self.session.abort()
    }

    /// Whether a sort is in flight; hide the controls while true.
    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// `"idle"`, `"running"`, `"finished"` or `"failed: <reason>"`.
    pub fn status(&self) -> String {
        match self.session.status() {
            RunStatus::Idle => "idle".to_owned(),
            RunStatus::Running => "running".to_owned(),
            RunStatus::Finished => "finished".to_owned(),
            RunStatus::Failed { reason } => format!("failed: {reason}"),
        }
    }

    /// Values in slot order.
    pub fn values(&self) -> Vec<u32> {
        self.session.values()
    }

    /// Bars in slot order as `{ id, value, height }` objects, for mounting.
    pub fn bars(&self) -> Array {
        let layout = &self.session.options().layout;
        self.session
            .elements()
            .iter()
            .map(|element| {
                let obj = Object::new();
                let _ = Reflect::set(
                    &obj,
                    &"id".into(),
                    &JsValue::from_f64(element.id().0 as f64),
                );
                let _ = Reflect::set(&obj, &"value".into(), &element.value().into());
                let _ = Reflect::set(
                    &obj,
                    &"height".into(),
                    &JsValue::from_f64(layout.bar_height(element.value())),
                );
                JsValue::from(obj)
            })
            .collect()
    }

    /// X coordinate of slot `slot`.
    #[wasm_bindgen(js_name = slotX)]
    pub fn slot_x(&self, slot: usize) -> f64 {
        self.session.options().layout.slot_x(slot)
    }

    /// JSON schema of the options accepted by [`Self::from_toml`].
    #[wasm_bindgen(js_name = optionsSchema)]
    pub fn options_schema() -> String {
        VisualizerOptions::json_schema().as_value().to_string()
    }
}
