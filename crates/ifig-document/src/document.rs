//! Standalone interactive document assembly.
//!
//! Every panel is baked into the document as an inline base64 PNG inside a
//! keyed container; the container identifier IS the canonical key, so the
//! in-document script only has to re-derive the key from live control
//! values and flip `display` on the matching container. No server, no
//! regeneration, no round-trip.

use std::fs;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::info;

use ifig_core::{DispatchOptions, DispatchOutput, PanelRenderer, dispatch_with, name_order};
use ifig_model::{ParameterDomain, Result};

use crate::controls::Control;
use crate::escape::escape_html;

/// Document-level options.
pub struct DocumentOptions {
    /// Document title.
    pub title: String,
    /// Include the styled control skin on top of the base layout rules.
    pub beautify: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: "Interactive figure".to_string(),
            beautify: true,
        }
    }
}

/// Builds the complete standalone HTML document.
///
/// Runs the full dispatch (every combination is rendered eagerly) and
/// embeds all panels; output is byte-for-byte reproducible for identical
/// inputs because panels arrive in enumeration order.
pub fn build_html(
    controls: &[&dyn Control],
    renderer: &mut dyn PanelRenderer,
    options: &DocumentOptions,
) -> Result<String> {
    build_html_with(controls, renderer, &DispatchOptions::default(), options)
}

/// `build_html` with explicit dispatch options (artifact recompression).
pub fn build_html_with(
    controls: &[&dyn Control],
    renderer: &mut dyn PanelRenderer,
    dispatch_options: &DispatchOptions<'_>,
    options: &DocumentOptions,
) -> Result<String> {
    let domains: Vec<&dyn ParameterDomain> = controls
        .iter()
        .map(|control| *control as &dyn ParameterDomain)
        .collect();
    let output = dispatch_with(&domains, renderer, dispatch_options)?;
    Ok(render_document(controls, &output, options))
}

/// Builds the document and writes it to `path`.
pub fn save_standalone_html(
    path: &Path,
    controls: &[&dyn Control],
    renderer: &mut dyn PanelRenderer,
    options: &DocumentOptions,
) -> Result<()> {
    let html = build_html(controls, renderer, options)?;
    fs::write(path, html)?;
    info!(path = %path.display(), "interactive figure saved");
    Ok(())
}

/// Assembles the document from already-dispatched panels. Useful when the
/// same dispatch output also feeds the static grid compositor.
pub fn render_document(
    controls: &[&dyn Control],
    output: &DispatchOutput,
    options: &DocumentOptions,
) -> String {
    let mut style = String::from(BASE_STYLE);
    if options.beautify {
        style.push_str(BEAUTIFY_STYLE);
    }

    let mut outputs = String::new();
    for panel in &output.panels {
        let display = if panel.visible { "block" } else { "none" };
        outputs.push_str("<div id=\"");
        outputs.push_str(&escape_html(panel.key.as_str()));
        outputs.push_str("\" style=\"display:");
        outputs.push_str(display);
        outputs.push_str("\">\n<img alt=\"figure\" src=\"data:image/png;base64,");
        outputs.push_str(&BASE64.encode(&panel.artifact));
        outputs.push_str("\"/>\n<div class=\"ifigurecaption\">");
        outputs.push_str(&escape_html(&panel.caption));
        outputs.push_str("</div>\n</div>\n");
    }

    // Controls render in the same name order the key encoder uses.
    let mut sorted: Vec<&&dyn Control> = controls.iter().collect();
    sorted.sort_by(|a, b| name_order(a.name(), b.name()));
    let widgets = sorted
        .iter()
        .map(|control| control.markup())
        .collect::<Vec<_>>()
        .join("\n<br>\n");

    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <script type=\"text/javascript\">\n{script}</script>\n\
         <style type=\"text/css\">\n{style}</style>\n</head>\n\
         <body>\n<div>\n<div id=\"outputs\">\n{outputs}</div>\n{widgets}\n</div>\n</body>\n</html>\n",
        title = escape_html(&options.title),
        script = SCRIPT,
        style = style,
        outputs = outputs,
        widgets = widgets,
    )
}

/// The client-side re-encoder. Mirrors `ifig_core::key` exactly: same
/// case-insensitive name sort with raw tie-break, same `toExponential(6)`
/// mantissa with the exponent padded to two digits, same undelimited
/// concatenation. Any change here must change the encoder in lockstep.
const SCRIPT: &str = r#"var mergeNodes = function(a, b) {
  return [].slice.call(a).concat([].slice.call(b));
};
function formatNumeric(raw) {
  return parseFloat(raw).toExponential(6).replace(/e([+-])(\d)$/, "e$10$2");
}
function controlValue(element) {
  if (element.getAttribute("data-kind") == "num") {
    return formatNumeric(element.value);
  }
  return element.value;
}
function interactUpdate(div) {
  div = div.parentNode.parentNode;
  var outputs = document.getElementById("outputs").children;
  var controls = mergeNodes(div.getElementsByTagName("input"),
                            div.getElementsByTagName("select"));
  controls.sort(function(a, b) {
    var an = a.getAttribute("name"), bn = b.getAttribute("name");
    var al = an.toLowerCase(), bl = bn.toLowerCase();
    if (al < bl) return -1;
    if (al > bl) return 1;
    if (an < bn) return -1;
    if (an > bn) return 1;
    return 0;
  });
  var key = "";
  for (var i = 0; i < controls.length; i++) {
    if (controls[i].type == "range" || controls[i].checked) {
      key = key + controls[i].getAttribute("name") + controlValue(controls[i]);
    }
    if (controls[i].type == "select-one") {
      var option = controls[i][controls[i].selectedIndex];
      key = key + controls[i].getAttribute("name") + controlValue(option);
    }
  }
  for (var i = 0; i < outputs.length; i++) {
    var name = outputs[i].getAttribute("id");
    if (name == key) {
      outputs[i].style.display = "block";
    } else if (name != "controls") {
      outputs[i].style.display = "none";
    }
  }
}
window.addEventListener("load", fitWindow);
window.addEventListener("resize", fitWindow);
function fitWindow() {
  var elm = document.body;
  var scale = Math.min(1, 1 / Math.max(elm.clientWidth / window.innerWidth,
                                       elm.clientHeight / window.innerHeight));
  elm.style.transformOrigin = "top left";
  elm.style.transform = "scale(" + scale + ")";
}
"#;

const BASE_STYLE: &str = r#"body {
  margin: 0px;
  user-select: none;
  -moz-user-select: none;
  -webkit-user-select: none;
  -ms-user-select: none;
  overflow: hidden;
}
div.left {
  margin-left: 10px;
  float: left;
  width: 300px;
  vertical-align: middle;
  max-width: 100%;
}
div.right {
  float: left;
  width: 300px;
  max-width: 100%;
}
div.wrap {
  display: inline-block;
  max-width: 100%;
}
img {
  max-width: 100%;
}
span.cbseparator {
  display: inline-block;
  margin: 0px;
  padding: 0px;
  height: 10px;
  width: 30px;
}
input[type=range] {
  height: 34px;
  margin: 10px 0;
  width: 100%;
  background-color: inherit;
}
input[type=range]:focus {
  outline: none;
}
"#;

const BEAUTIFY_STYLE: &str = r#"body {
  font-family: 'Source Sans Pro', sans-serif;
}
select {
  padding: 5px 10px;
  -webkit-appearance: none;
  -moz-appearance: none;
  appearance: none;
  background-color: transparent;
  border: 4px solid #7E317B;
  border-radius: 10px;
}
"#;
