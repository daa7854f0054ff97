//! Web Speech API backend.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::adapter::{
    DEFAULT_RECOGNITION_LANG, SessionHandlers, SpeechBackend, UNSUPPORTED_MESSAGE, VoiceResult,
    describe_recognition_error,
};

const HANDLER_PROPS: [&str; 3] = ["onresult", "onerror", "onend"];

/// `SpeechRecognition` (or the `webkit` prefixed constructor) when present.
pub struct BrowserSpeech {
    constructor: Option<Function>,
    lang: String,
    recognition: Option<JsValue>,
    closures: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl BrowserSpeech {
    #[must_use]
    pub fn detect() -> Self {
        let constructor = web_sys::window().and_then(|window| {
            ["SpeechRecognition", "webkitSpeechRecognition"]
                .into_iter()
                .filter_map(|name| Reflect::get(&window, &name.into()).ok())
                .find_map(|value| value.dyn_into::<Function>().ok())
        });
        Self { constructor, lang: DEFAULT_RECOGNITION_LANG.to_owned(), recognition: None, closures: Vec::new() }
    }

    fn detach(&mut self) {
        if let Some(recognition) = &self.recognition {
            for prop in HANDLER_PROPS {
                let _ = Reflect::set(recognition, &prop.into(), &JsValue::NULL);
            }
        }
        self.closures.clear();
    }
}

impl SpeechBackend for BrowserSpeech {
    fn is_available(&self) -> bool {
        self.constructor.is_some()
    }

    fn set_language(&mut self, lang: &str) {
        lang.clone_into(&mut self.lang);
    }

    fn start(&mut self, handlers: SessionHandlers) {
        let SessionHandlers { mut on_result, on_error, mut on_end } = handlers;
        let on_error = Rc::new(RefCell::new(on_error));
        let report = |message: &str| (*on_error.borrow_mut())(message.to_owned());

        let Some(constructor) = &self.constructor else {
            report(UNSUPPORTED_MESSAGE);
            return;
        };
        let Ok(recognition) = Reflect::construct(constructor, &Array::new()) else {
            report("Voice input could not be started.");
            return;
        };
        let _ = Reflect::set(&recognition, &"continuous".into(), &JsValue::FALSE);
        let _ = Reflect::set(&recognition, &"interimResults".into(), &JsValue::TRUE);
        let _ = Reflect::set(&recognition, &"maxAlternatives".into(), &JsValue::from(1));
        let _ = Reflect::set(&recognition, &"lang".into(), &JsValue::from_str(&self.lang));

        let onresult = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            if let Some(result) = result_from_event(&event) {
                on_result(result);
            }
        });
        let error_sink = on_error.clone();
        let onerror = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let code = Reflect::get(&event, &"error".into())
                .ok()
                .and_then(|code| code.as_string())
                .unwrap_or_default();
            (*error_sink.borrow_mut())(describe_recognition_error(&code));
        });
        let onend = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| on_end());

        self.detach();
        for (prop, closure) in HANDLER_PROPS.into_iter().zip([&onresult, &onerror, &onend]) {
            let _ = Reflect::set(&recognition, &prop.into(), closure.as_ref().unchecked_ref());
        }
        self.closures = vec![onresult, onerror, onend];

        let started = Reflect::get(&recognition, &"start".into())
            .and_then(|start| start.dyn_into::<Function>())
            .and_then(|start| start.call0(&recognition));
        self.recognition = Some(recognition);
        if started.is_err() {
            self.detach();
            self.recognition = None;
            report("Voice input could not be started.");
        }
    }

    fn stop(&mut self) -> Result<(), String> {
        self.detach();
        let Some(recognition) = self.recognition.take() else {
            return Ok(());
        };
        Reflect::get(&recognition, &"abort".into())
            .and_then(|abort| abort.dyn_into::<Function>())
            .and_then(|abort| abort.call0(&recognition))
            .map(|_| ())
            .map_err(|e| format!("{e:?}"))
    }
}

/// Cumulative transcript of the utterance; final once its last segment is.
fn result_from_event(event: &JsValue) -> Option<VoiceResult> {
    let results = Reflect::get(event, &"results".into()).ok()?;
    let length = Reflect::get(&results, &"length".into()).ok()?.as_f64()? as u32;
    let mut transcript = String::new();
    let mut confidence = 0.0;
    let mut is_final = false;
    for index in 0..length {
        let result = Reflect::get_u32(&results, index).ok()?;
        let alternative = Reflect::get_u32(&result, 0).ok()?;
        if let Some(text) = Reflect::get(&alternative, &"transcript".into()).ok()?.as_string() {
            transcript.push_str(&text);
        }
        confidence = Reflect::get(&alternative, &"confidence".into()).ok()?.as_f64().unwrap_or(0.0) as f32;
        is_final = Reflect::get(&result, &"isFinal".into()).ok()?.as_bool().unwrap_or(false);
    }
    Some(VoiceResult { transcript: transcript.trim().to_owned(), confidence, is_final })
}
