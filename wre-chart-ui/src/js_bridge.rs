//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Leaflet map and D3.js chart functions live in `assets/js/*.js` and are
//! loaded at runtime. They are evaluated as globals (no ES modules) and
//! exposed via `window.*`. This module serializes data for them and calls
//! those globals once their libraries and container elements exist.

use wasm_bindgen::JsValue;

// Embed the renderer JS files at compile time
static WATER_MAP_JS: &str = include_str!("../assets/js/water-map.js");
static FORECAST_CHART_JS: &str = include_str!("../assets/js/forecast-chart.js");

/// Execute arbitrary JS, logging instead of panicking on failure.
pub fn call_js(code: &str) {
    if let Err(e) = js_sys::eval(code) {
        log::warn!("WRE JS call failed: {}", describe(&e));
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Quote `value` as a JS string literal.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// D3.js script URL.
const D3_URL: &str = "https://cdn.jsdelivr.net/npm/d3@7";
/// Leaflet script and stylesheet URLs.
const LEAFLET_JS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_CSS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

/// Append the D3 and Leaflet tags to `<head>` unless the host page already
/// provides them. Call once at app startup.
pub fn load_libraries() {
    let d3 = js_string(D3_URL);
    let leaflet_js = js_string(LEAFLET_JS_URL);
    let leaflet_css = js_string(LEAFLET_CSS_URL);
    call_js(&format!(
        r#"
        (function() {{
            function addScript(src) {{
                if (document.querySelector('script[src="' + src + '"]')) return;
                var s = document.createElement('script');
                s.src = src;
                document.head.appendChild(s);
            }}
            if (typeof d3 === 'undefined') addScript({d3});
            if (typeof L === 'undefined') {{
                if (!document.querySelector('link[href="' + {leaflet_css} + '"]')) {{
                    var css = document.createElement('link');
                    css.rel = 'stylesheet';
                    css.href = {leaflet_css};
                    document.head.appendChild(css);
                }}
                addScript({leaflet_js});
            }}
        }})();
        "#
    ));
}

/// Initialize renderer scripts once Leaflet and D3 are present.
///
/// The scripts declare functions like `renderWaterMap(...)`. They are stored
/// on `window` and evaluated at global scope from the polling callback (an
/// indirect eval), then each entry point is promoted to `window.*`.
pub fn init_renderers() {
    let all_js = [WATER_MAP_JS, FORECAST_CHART_JS].join("\n");
    call_js(&format!(
        "if (!window.__wreRenderersReady) window.__wreRendererScripts = {};",
        js_string(&all_js)
    ));

    call_js(
        r#"
        (function() {
            if (window.__wreRenderersPolling || window.__wreRenderersReady) return;
            window.__wreRenderersPolling = true;
            var waitForLibs = setInterval(function() {
                if (typeof d3 !== 'undefined' && typeof L !== 'undefined') {
                    clearInterval(waitForLibs);
                    (0, eval)(window.__wreRendererScripts);
                    delete window.__wreRendererScripts;
                    if (typeof renderWaterMap !== 'undefined') window.renderWaterMap = renderWaterMap;
                    if (typeof destroyWaterMap !== 'undefined') window.destroyWaterMap = destroyWaterMap;
                    if (typeof renderForecastChart !== 'undefined') window.renderForecastChart = renderForecastChart;
                    window.__wreRenderersReady = true;
                    console.log('WRE renderers initialized');
                }
            }, 100);
        })();
    "#,
    );
}

/// Poll until renderers are ready and `container_id` exists, then call
/// `window.{function}(container_id, data, config)`.
fn render_when_ready(function: &str, container_id: &str, data_json: &str, config_json: &str) {
    let id = js_string(container_id);
    let data = js_string(data_json);
    let config = js_string(config_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__wreRenderersReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window.{function}({id}, {data}, {config});
                    }} catch(e) {{ console.error('[WRE] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render the water map: `data_json` carries the styled layer and the raw
/// GeoJSON shapes, `config_json` the initial view.
pub fn render_water_map(container_id: &str, data_json: &str, config_json: &str) {
    render_when_ready("renderWaterMap", container_id, data_json, config_json);
}

/// Render the historical/forecast chart from merged chart rows.
pub fn render_forecast_chart(container_id: &str, data_json: &str, config_json: &str) {
    render_when_ready("renderForecastChart", container_id, data_json, config_json);
}

/// Tear down the Leaflet map bound to `container_id`, if any.
pub fn destroy_water_map(container_id: &str) {
    let id = js_string(container_id);
    call_js(&format!(
        "if (typeof window.destroyWaterMap !== 'undefined') window.destroyWaterMap({id});"
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(container_id));
    if let Some(element) = element {
        element.set_inner_html("");
    }
}
