use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use log::warn;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, HtmlElement};

use slideshow_core::{
    DirectionHint, Navigation, PageMatcher, PageTarget, Settings, SettingsOverrides, Slideshow,
    SlideshowEvent,
};

pub mod dom;

pub use dom::WebStage;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn install_logging() {
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    {
        // A second slideshow on the page finds the logger already installed.
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}

#[derive(Default)]
struct Listeners {
    show: Vec<(PageMatcher, Function)>,
    hide: Vec<(PageMatcher, Function)>,
    events: Vec<Function>,
}

/// Page event resolved against the DOM while the core was borrowed.
struct Delivery {
    event: SlideshowEvent,
    element: Option<HtmlElement>,
}

pub(crate) struct Shared {
    core: RefCell<Slideshow<WebStage>>,
    listeners: RefCell<Listeners>,
    /// Index of the page whose hide is being delivered.
    hiding: Cell<Option<usize>>,
}

impl Shared {
    /// Run `f` against the core, then deliver the events it produced with
    /// the core released, so listeners may issue further commands.
    pub(crate) fn run<R>(&self, f: impl FnOnce(&mut Slideshow<WebStage>) -> R) -> R {
        let (out, deliveries) = {
            let mut core = self.core.borrow_mut();
            let out = f(&mut core);
            let deliveries: Vec<Delivery> = core
                .take_events()
                .into_iter()
                .map(|event| {
                    let element = match &event {
                        SlideshowEvent::PageShown { index, .. }
                        | SlideshowEvent::PageHidden { index, .. } => core
                            .pages()
                            .at(*index as i64)
                            .ok()
                            .and_then(|p| core.host().element(p.handle).cloned()),
                        _ => None,
                    };
                    Delivery { event, element }
                })
                .collect();
            (out, deliveries)
        };
        for delivery in &deliveries {
            self.deliver(delivery);
        }
        out
    }

    fn deliver(&self, delivery: &Delivery) {
        let (name, index, identifier, shown) = match &delivery.event {
            SlideshowEvent::PageShown { index, identifier } => {
                ("show_page", *index, identifier, true)
            }
            SlideshowEvent::PageHidden { index, identifier } => {
                ("hide_page", *index, identifier, false)
            }
            other => {
                self.notify_event_listeners(other);
                return;
            }
        };
        // The core has already moved on; hide listeners still see the outgoing page.
        if !shown {
            self.hiding.set(Some(index));
        }
        self.notify_event_listeners(&delivery.event);

        let id_js = identifier
            .as_deref()
            .map(JsValue::from_str)
            .unwrap_or(JsValue::NULL);
        let index_js = JsValue::from_f64(index as f64);

        if let Some(el) = &delivery.element {
            let detail = Object::new();
            let _ = Reflect::set(&detail, &"index".into(), &index_js);
            let _ = Reflect::set(&detail, &"id".into(), &id_js);
            let init = CustomEventInit::new();
            init.set_detail(&detail);
            match CustomEvent::new_with_event_init_dict(name, &init) {
                Ok(evt) => {
                    let _ = el.dispatch_event(&evt);
                }
                Err(e) => warn!("slideshow-wasm: {name} event not created: {e:?}"),
            }
        }

        let callbacks: Vec<Function> = {
            let listeners = self.listeners.borrow();
            let entries = if shown {
                &listeners.show
            } else {
                &listeners.hide
            };
            entries
                .iter()
                .filter(|(m, _)| m.matches(index, identifier.as_deref()))
                .map(|(_, f)| f.clone())
                .collect()
        };
        for f in callbacks {
            if let Err(e) = f.call2(&JsValue::UNDEFINED, &index_js, &id_js) {
                warn!("slideshow-wasm: {name} callback threw: {e:?}");
            }
        }
        self.hiding.set(None);
    }

    fn notify_event_listeners(&self, event: &SlideshowEvent) {
        let listeners: Vec<Function> = self.listeners.borrow().events.clone();
        if listeners.is_empty() {
            return;
        }
        let Ok(payload) = swb::to_value(event) else {
            return;
        };
        for f in listeners {
            if let Err(e) = f.call1(&JsValue::UNDEFINED, &payload) {
                warn!("slideshow-wasm: event listener threw: {e:?}");
            }
        }
    }
}

fn matcher(spec: &str) -> PageMatcher {
    if spec == "*" {
        PageMatcher::Any
    } else {
        PageMatcher::id(spec)
    }
}

fn nav_result(nav: Result<Navigation, slideshow_core::SlideshowError>) -> Result<bool, JsError> {
    nav.map(|n| n.launched())
        .map_err(|e| JsError::new(&format!("navigation error: {e}")))
}

#[wasm_bindgen]
pub struct WebSlideshow {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl WebSlideshow {
    /// Attach to `container`, discovering its `.page` children.
    /// `options` is a settings object or undefined/null for defaults:
    ///   new WebSlideshow(el, { transition_type: "carousel", auto_play: true })
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, options: JsValue) -> Result<WebSlideshow, JsError> {
        install_logging();

        let settings: Settings = if jsvalue_is_undefined_or_null(&options) {
            Settings::default()
        } else {
            swb::from_value(options).map_err(|e| JsError::new(&format!("options error: {e}")))?
        };

        let core = Slideshow::new(settings, WebStage::new(container))
            .map_err(|e| JsError::new(&format!("slideshow init error: {e}")))?;
        let shared = Rc::new(Shared {
            core: RefCell::new(core),
            listeners: RefCell::new(Listeners::default()),
            hiding: Cell::new(None),
        });
        shared
            .core
            .borrow_mut()
            .host_mut()
            .bind(Rc::downgrade(&shared));

        Ok(WebSlideshow { shared })
    }

    /// Returns true when a transition was launched.
    #[wasm_bindgen(js_name = next_page)]
    pub fn next_page(&self) -> Result<bool, JsError> {
        nav_result(self.shared.run(|core| core.next_page()))
    }

    #[wasm_bindgen(js_name = prev_page)]
    pub fn prev_page(&self) -> Result<bool, JsError> {
        nav_result(self.shared.run(|core| core.prev_page()))
    }

    /// `target` is an index or a page id (`"intro"` or `"#intro"`).
    /// `direction` is "forward" (default), "backward" or "intelligent".
    #[wasm_bindgen(js_name = go_to)]
    pub fn go_to(&self, target: JsValue, direction: Option<String>) -> Result<bool, JsError> {
        let target = if let Some(n) = target.as_f64() {
            PageTarget::Index(n as i64)
        } else if let Some(s) = target.as_string() {
            PageTarget::Id(s)
        } else {
            return Err(JsError::new("go_to: target must be a number or a string"));
        };
        let hint = match direction.as_deref() {
            None => None,
            Some("forward") => Some(DirectionHint::Forward),
            Some("backward") => Some(DirectionHint::Backward),
            Some("intelligent") => Some(DirectionHint::Intelligent),
            Some(other) => {
                return Err(JsError::new(&format!("go_to: unknown direction {other:?}")))
            }
        };
        nav_result(self.shared.run(|core| core.go_to(target, hint)))
    }

    /// Enable autoplay, merging optional overrides first.
    #[wasm_bindgen]
    pub fn start(&self, overrides: JsValue) -> Result<(), JsError> {
        let overrides: SettingsOverrides = if jsvalue_is_undefined_or_null(&overrides) {
            SettingsOverrides::default()
        } else {
            swb::from_value(overrides)
                .map_err(|e| JsError::new(&format!("start overrides error: {e}")))?
        };
        self.shared
            .run(|core| core.start(&overrides))
            .map_err(|e| JsError::new(&format!("start error: {e}")))
    }

    #[wasm_bindgen]
    pub fn stop(&self) {
        self.shared.run(|core| core.stop());
    }

    /// Append a page from HTML markup. Returns its handle.
    #[wasm_bindgen(js_name = add_page)]
    pub fn add_page(&self, markup: String) -> Result<u32, JsError> {
        self.shared
            .run(|core| core.add_page(&markup))
            .map(|h| h.0)
            .map_err(|e| JsError::new(&format!("add_page error: {e}")))
    }

    /// Inside an `on_hide` callback or `hide_page` listener this is still
    /// the page being hidden.
    #[wasm_bindgen(js_name = current_index)]
    pub fn current_index(&self) -> Option<u32> {
        if let Some(index) = self.shared.hiding.get() {
            return Some(index as u32);
        }
        self.shared
            .core
            .borrow()
            .current_index()
            .map(|i| i as u32)
    }

    #[wasm_bindgen(js_name = page_count)]
    pub fn page_count(&self) -> u32 {
        self.shared.core.borrow().pages().size() as u32
    }

    /// Register `f(index, id)` for pages matching `page` ("*" for all).
    #[wasm_bindgen(js_name = on_show)]
    pub fn on_show(&self, page: String, f: Function) {
        self.shared
            .listeners
            .borrow_mut()
            .show
            .push((matcher(&page), f));
    }

    #[wasm_bindgen(js_name = on_hide)]
    pub fn on_hide(&self, page: String, f: Function) {
        self.shared
            .listeners
            .borrow_mut()
            .hide
            .push((matcher(&page), f));
    }

    /// Receive every slideshow event as a JSON-like object.
    #[wasm_bindgen(js_name = on_event)]
    pub fn on_event(&self, f: Function) {
        self.shared.listeners.borrow_mut().events.push(f);
    }
}

impl Drop for WebSlideshow {
    fn drop(&mut self) {
        if let Ok(mut core) = self.shared.core.try_borrow_mut() {
            core.stop();
        }
    }
}
