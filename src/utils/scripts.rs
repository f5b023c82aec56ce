//! Builders for the scripts the layer evaluates inside the page.
//!
//! Selectors and values are embedded as JSON string literals; numbers are
//! formatted inline. Each script is a self-invoking function so page globals
//! are never touched.

use crate::errors::Result;
use crate::types::ElementState;

pub const USER_AGENT: &str = "navigator.userAgent";

pub const VIEWPORT_PROBE: &str = r#"
(function() {
    return { width: window.innerWidth, height: window.innerHeight };
})()
"#;

/// Shared locator. Plain CSS goes through querySelector; a `text=` prefix
/// locates the innermost rendered element whose trimmed text matches; a
/// trailing `:has-text("...")` filters a CSS match by contained text.
const FIND_TARGET: &str = r#"
    const findTarget = (sel) => {
        const hasText = sel.match(/^(.+):has-text\("(.*)"\)$/);
        if (hasText) {
            const candidates = Array.from(document.querySelectorAll(hasText[1]))
                .filter((el) => (el.textContent || '').indexOf(hasText[2]) !== -1);
            return candidates.length ? candidates[candidates.length - 1] : null;
        }
        if (sel.indexOf('text=') === 0) {
            const needle = sel.slice(5);
            const rendered = (el) =>
                el.getClientRects().length > 0 || el.offsetWidth > 0 || el.offsetHeight > 0;
            const matches = Array.from(document.querySelectorAll('*')).filter((el) => {
                if (!rendered(el)) return false;
                const text = (el.textContent || '').trim();
                return text === needle || text.indexOf(needle) !== -1;
            });
            if (matches.length === 0) return null;
            return matches.find((el) =>
                !matches.some((other) => other !== el && el.contains(other))) || matches[0];
        }
        try {
            return document.querySelector(sel);
        } catch (e) {
            return null;
        }
    };
"#;

const STATE_BODY: &str = r#"
    const el = findTarget(sel);
    const visible = () => {
        if (!el) return false;
        const rect = el.getBoundingClientRect();
        const style = window.getComputedStyle(el);
        return rect.width > 0 && rect.height > 0 &&
            style.visibility !== 'hidden' && style.display !== 'none';
    };
    if (state === 'visible') return visible();
    if (state === 'hidden') return !visible();
    return el !== null;
"#;

const BOUNDING_BOX_BODY: &str = r#"
    const el = findTarget(sel);
    if (!el) return null;
    const rect = el.getBoundingClientRect();
    if (rect.width === 0 && rect.height === 0) return null;
    return { x: rect.x, y: rect.y, width: rect.width, height: rect.height };
"#;

const SET_VALUE_BODY: &str = r#"
    const el = findTarget(sel);
    if (!el) return { success: false, error: 'element not found' };
    el.focus();
    if (el.isContentEditable) {
        el.textContent = value;
    } else {
        el.value = value;
    }
    ['input', 'change'].forEach((type) => {
        el.dispatchEvent(new Event(type, { bubbles: true, cancelable: true }));
    });
    return { success: true };
"#;

const SELECT_VALUE_BODY: &str = r#"
    const el = findTarget(sel);
    if (!el) return { success: false, error: 'element not found' };
    if (typeof el.selectedIndex !== 'number' || !el.options) {
        return { success: false, error: 'not a native select' };
    }
    const options = Array.from(el.options);
    const index = options.findIndex((option) =>
        option.value === value || option.label === value ||
        (option.textContent || '').trim() === value);
    if (index < 0) return { success: false, error: 'no option matching ' + value };
    el.selectedIndex = index;
    ['input', 'change'].forEach((type) => {
        el.dispatchEvent(new Event(type, { bubbles: true, cancelable: true }));
    });
    return { success: true };
"#;

const SCROLL_BY_BODY: &str = r#"
    const el = findTarget(sel);
    if (!el) return { success: false, error: 'element not found' };
    el.scrollBy({ top: delta, behavior: 'smooth' });
    return { success: true };
"#;

const MOUSE_EVENT_BODY: &str = r#"
    const target = document.elementFromPoint(x, y) || document.documentElement;
    target.dispatchEvent(new MouseEvent(type, {
        bubbles: true,
        cancelable: true,
        view: window,
        clientX: x,
        clientY: y,
        screenX: x,
        screenY: y,
        button: 0,
        buttons: buttons,
    }));
    return true;
"#;

const TOUCH_TAP_BODY: &str = r#"
    const target = document.elementFromPoint(x, y);
    if (!target) return false;
    const touch = new Touch({
        identifier: Date.now(),
        target: target,
        clientX: x,
        clientY: y,
        screenX: x,
        screenY: y,
    });
    target.dispatchEvent(new TouchEvent('touchstart', {
        cancelable: true,
        bubbles: true,
        touches: [touch],
        targetTouches: [touch],
        changedTouches: [touch],
    }));
    target.dispatchEvent(new TouchEvent('touchend', {
        cancelable: true,
        bubbles: true,
        touches: [],
        targetTouches: [],
        changedTouches: [touch],
    }));
    target.dispatchEvent(new MouseEvent('click', {
        bubbles: true,
        cancelable: true,
        clientX: x,
        clientY: y,
    }));
    return true;
"#;

const TOUCH_HOLD_BODY: &str = r#"
    return new Promise((resolve) => {
        const target = document.elementFromPoint(x, y);
        let touch = null;
        if (target) {
            touch = new Touch({
                identifier: Date.now(),
                target: target,
                clientX: x,
                clientY: y,
                screenX: x,
                screenY: y,
            });
            target.dispatchEvent(new TouchEvent('touchstart', {
                cancelable: true,
                bubbles: true,
                touches: [touch],
                targetTouches: [touch],
                changedTouches: [touch],
            }));
        }
        setTimeout(() => {
            if (target && touch) {
                target.dispatchEvent(new TouchEvent('touchend', {
                    cancelable: true,
                    bubbles: true,
                    touches: [],
                    targetTouches: [],
                    changedTouches: [touch],
                }));
            }
            resolve(target !== null);
        }, duration);
    });
"#;

const TOUCH_SWIPE_BODY: &str = r#"
    return new Promise((resolve) => {
        const target = document.elementFromPoint(startX, startY);
        if (!target) {
            resolve(false);
            return;
        }
        const start = new Touch({
            identifier: Date.now(),
            target: target,
            clientX: startX,
            clientY: startY,
            screenX: startX,
            screenY: startY,
        });
        target.dispatchEvent(new TouchEvent('touchstart', {
            cancelable: true,
            bubbles: true,
            touches: [start],
            targetTouches: [start],
            changedTouches: [start],
        }));
        setTimeout(() => {
            const end = new Touch({
                identifier: start.identifier,
                target: target,
                clientX: endX,
                clientY: endY,
                screenX: endX,
                screenY: endY,
            });
            target.dispatchEvent(new TouchEvent('touchmove', {
                cancelable: true,
                bubbles: true,
                touches: [end],
                targetTouches: [end],
                changedTouches: [end],
            }));
            target.dispatchEvent(new TouchEvent('touchend', {
                cancelable: true,
                bubbles: true,
                touches: [],
                targetTouches: [],
                changedTouches: [end],
            }));
            resolve(true);
        }, duration);
    });
"#;

pub fn element_state(selector: &str, state: ElementState) -> Result<String> {
    let sel = serde_json::to_string(selector)?;
    let state = serde_json::to_string(state.as_str())?;
    Ok(format!(
        "(function(sel, state) {{{FIND_TARGET}{STATE_BODY}}})({sel}, {state})"
    ))
}

pub fn bounding_box(selector: &str) -> Result<String> {
    let sel = serde_json::to_string(selector)?;
    Ok(format!(
        "(function(sel) {{{FIND_TARGET}{BOUNDING_BOX_BODY}}})({sel})"
    ))
}

pub fn set_value(selector: &str, value: &str) -> Result<String> {
    let sel = serde_json::to_string(selector)?;
    let value = serde_json::to_string(value)?;
    Ok(format!(
        "(function(sel, value) {{{FIND_TARGET}{SET_VALUE_BODY}}})({sel}, {value})"
    ))
}

pub fn select_value(selector: &str, value: &str) -> Result<String> {
    let sel = serde_json::to_string(selector)?;
    let value = serde_json::to_string(value)?;
    Ok(format!(
        "(function(sel, value) {{{FIND_TARGET}{SELECT_VALUE_BODY}}})({sel}, {value})"
    ))
}

pub fn scroll_by(selector: &str, delta_y: f64) -> Result<String> {
    let sel = serde_json::to_string(selector)?;
    Ok(format!(
        "(function(sel, delta) {{{FIND_TARGET}{SCROLL_BY_BODY}}})({sel}, {delta_y})"
    ))
}

pub fn mouse_event(kind: &str, x: f64, y: f64, buttons: u32) -> Result<String> {
    let kind = serde_json::to_string(kind)?;
    Ok(format!(
        "(function(type, x, y, buttons) {{{MOUSE_EVENT_BODY}}})({kind}, {x}, {y}, {buttons})"
    ))
}

pub fn touch_tap(x: f64, y: f64) -> String {
    format!("(function(x, y) {{{TOUCH_TAP_BODY}}})({x}, {y})")
}

pub fn touch_hold(x: f64, y: f64, duration_ms: u64) -> String {
    format!("(function(x, y, duration) {{{TOUCH_HOLD_BODY}}})({x}, {y}, {duration_ms})")
}

pub fn touch_swipe(start_x: f64, start_y: f64, end_x: f64, end_y: f64, duration_ms: u64) -> String {
    format!(
        "(function(startX, startY, endX, endY, duration) {{{TOUCH_SWIPE_BODY}}})({start_x}, {start_y}, {end_x}, {end_y}, {duration_ms})"
    )
}
