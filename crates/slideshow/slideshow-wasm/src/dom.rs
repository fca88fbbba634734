//! Browser host: DOM page discovery, inline styles, Web Animations and
//! `setTimeout` timers.
//!
//! Every continuation (animation finished, timer expired, button clicked)
//! runs from the event loop and re-enters the slideshow through
//! [`Shared::run`], never while the core is borrowed.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use js_sys::{Array, Object, Reflect};
use log::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use slideshow_core::{
    AnimationRequest, AnimationTicket, Animator, ButtonSide, ContainerSize, Motion, PageHandle,
    PageSpec, Stage, StyleMap, StyleTarget, TimerHandle, Timers,
};

use crate::Shared;

const PAGE_SELECTOR: &str = ".page";
const LEFT_BUTTON: &str = ".button_area > #lb";
const RIGHT_BUTTON: &str = ".button_area > #rb";

pub struct WebStage {
    container: HtmlElement,
    pages: HashMap<PageHandle, HtmlElement>,
    timers: HashMap<TimerHandle, i32>,
    owner: Weak<Shared>,
}

impl WebStage {
    pub fn new(container: HtmlElement) -> Self {
        Self {
            container,
            pages: HashMap::new(),
            timers: HashMap::new(),
            owner: Weak::new(),
        }
    }

    /// Attach the owning slideshow and wire buttons on every known page.
    pub(crate) fn bind(&mut self, owner: Weak<Shared>) {
        self.owner = owner;
        for page in self.pages.values() {
            wire_buttons(page, &self.owner);
        }
    }

    pub(crate) fn element(&self, handle: PageHandle) -> Option<&HtmlElement> {
        self.pages.get(&handle)
    }

    fn target(&self, target: StyleTarget) -> Option<&HtmlElement> {
        match target {
            StyleTarget::Container => Some(&self.container),
            StyleTarget::Page(handle) => self.pages.get(&handle),
        }
    }
}

fn apply(el: &HtmlElement, style: &StyleMap) {
    let decl = el.style();
    for (name, value) in style {
        if let Err(e) = decl.set_property(name, value) {
            warn!("slideshow-wasm: set {name}={value} failed: {e:?}");
        }
    }
}

fn keyframes(frames: &[StyleMap]) -> Result<Array, JsValue> {
    let out = Array::new();
    for frame in frames {
        let obj = Object::new();
        for (name, value) in frame {
            Reflect::set(&obj, &JsValue::from_str(name), &JsValue::from_str(value))?;
        }
        out.push(&obj);
    }
    Ok(out)
}

fn wire_buttons(page: &HtmlElement, owner: &Weak<Shared>) {
    for (selector, side) in [(LEFT_BUTTON, ButtonSide::Left), (RIGHT_BUTTON, ButtonSide::Right)] {
        let button = match page.query_selector(selector) {
            Ok(Some(button)) => button,
            Ok(None) => continue,
            Err(e) => {
                warn!("slideshow-wasm: bad selector {selector}: {e:?}");
                continue;
            }
        };
        let owner = owner.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            if let Some(shared) = owner.upgrade() {
                if let Err(e) = shared.run(|core| core.button_pressed(side)) {
                    error!("slideshow-wasm: button navigation failed: {e}");
                }
            }
        });
        if let Err(e) =
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        {
            warn!("slideshow-wasm: click listener not attached: {e:?}");
        }
        on_click.forget();
    }
}

/// Called once per finished track; the last one reports the ticket.
fn finish_track(
    el: HtmlElement,
    motion: Motion,
    remaining: Rc<Cell<usize>>,
    ticket: AnimationTicket,
    owner: Weak<Shared>,
) {
    apply(&el, &motion.end_style());
    remaining.set(remaining.get().saturating_sub(1));
    if remaining.get() == 0 {
        if let Some(shared) = owner.upgrade() {
            shared.run(|core| core.on_animation_complete(ticket));
        }
    }
}

fn set_timeout(callback: JsValue, delay_ms: u32) -> Option<i32> {
    let window = web_sys::window()?;
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay_ms.min(i32::MAX as u32) as i32,
        )
        .map_err(|e| error!("slideshow-wasm: setTimeout failed: {e:?}"))
        .ok()
}

impl Stage for WebStage {
    fn container_size(&self) -> Option<ContainerSize> {
        let (width, height) = (self.container.client_width(), self.container.client_height());
        Some(ContainerSize {
            width: f64::from(width),
            height: f64::from(height),
        })
    }

    fn discover_pages(&mut self) -> Vec<PageSpec> {
        let nodes = match self.container.query_selector_all(PAGE_SELECTOR) {
            Ok(nodes) => nodes,
            Err(e) => {
                error!("slideshow-wasm: page discovery failed: {e:?}");
                return Vec::new();
            }
        };
        let mut specs = Vec::new();
        for i in 0..nodes.length() {
            let Some(el) = nodes
                .item(i)
                .and_then(|n| n.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            // The core numbers discovered pages from zero in this order.
            let handle = PageHandle(specs.len() as u32);
            specs.push(spec_of(&el));
            self.pages.insert(handle, el);
        }
        specs
    }

    fn apply_style(&mut self, target: StyleTarget, style: &StyleMap) {
        match self.target(target) {
            Some(el) => apply(el, style),
            None => warn!("slideshow-wasm: no element for {target:?}"),
        }
    }

    fn insert_page(&mut self, handle: PageHandle, markup: &str) -> Result<PageSpec, String> {
        let document = self
            .container
            .owner_document()
            .ok_or_else(|| "container is detached from a document".to_string())?;
        let holder = document
            .create_element("div")
            .map_err(|e| format!("{e:?}"))?;
        holder.set_inner_html(markup);
        let page: HtmlElement = holder
            .first_element_child()
            .and_then(|el: Element| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| "markup does not contain an element".to_string())?;
        self.container
            .append_child(&page)
            .map_err(|e| format!("{e:?}"))?;
        wire_buttons(&page, &self.owner);
        let spec = spec_of(&page);
        self.pages.insert(handle, page);
        Ok(spec)
    }
}

fn spec_of(el: &HtmlElement) -> PageSpec {
    let id = el.id();
    PageSpec {
        identifier: (!id.is_empty()).then_some(id),
    }
}

impl Animator for WebStage {
    fn animate(&mut self, request: AnimationRequest) {
        let AnimationRequest {
            ticket,
            duration_ms,
            tracks,
        } = request;
        let remaining = Rc::new(Cell::new(tracks.len()));
        for (handle, motion) in tracks {
            let Some(el) = self.pages.get(&handle).cloned() else {
                warn!("slideshow-wasm: no element for {handle:?}");
                remaining.set(remaining.get().saturating_sub(1));
                continue;
            };
            apply(&el, &motion.start_style());

            let frames = motion.keyframes();
            let (target, remaining, owner) = (el.clone(), remaining.clone(), self.owner.clone());
            let done = Closure::once_into_js(move || {
                finish_track(target, motion, remaining, ticket, owner)
            });
            if frames.is_empty() {
                // keep completion asynchronous
                set_timeout(done, 0);
                continue;
            }
            match keyframes(&frames) {
                Ok(frames) => {
                    let frames: Object = frames.into();
                    let animation = el.animate_with_f64(Some(&frames), f64::from(duration_ms));
                    animation.set_onfinish(Some(done.unchecked_ref()));
                }
                Err(e) => {
                    warn!("slideshow-wasm: keyframes rejected: {e:?}");
                    set_timeout(done, duration_ms);
                }
            }
        }
        if remaining.get() == 0 {
            let owner = self.owner.clone();
            let done = Closure::once_into_js(move || {
                if let Some(shared) = owner.upgrade() {
                    shared.run(|core| core.on_animation_complete(ticket));
                }
            });
            set_timeout(done, 0);
        }
    }
}

impl Timers for WebStage {
    fn schedule(&mut self, handle: TimerHandle, delay_ms: u32) {
        let owner = self.owner.clone();
        let fire = Closure::once_into_js(move || {
            if let Some(shared) = owner.upgrade() {
                let fired = shared.run(|core| {
                    core.host_mut().timers.remove(&handle);
                    core.on_timer_fired(handle)
                });
                if let Err(e) = fired {
                    error!("slideshow-wasm: autoplay step failed: {e}");
                }
            }
        });
        if let Some(id) = set_timeout(fire, delay_ms) {
            self.timers.insert(handle, id);
        }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let (Some(id), Some(window)) = (self.timers.remove(&handle), web_sys::window()) {
            window.clear_timeout_with_handle(id);
        }
    }
}
