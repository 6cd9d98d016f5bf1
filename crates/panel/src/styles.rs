use crate::config::PanelConfig;
use dom::Document;

/// Render the presentation rules for the slim layout. Everything is scoped
/// under the marker class on `body`, so flipping that one class is the only
/// switch the rest of the engine ever touches.
pub fn slim_stylesheet(cfg: &PanelConfig) -> String {
    let side = &cfg.side_panel;
    let grid = &cfg.main_grid;
    let marker = &cfg.marker_class;
    let control = &cfg.control_id;
    let width = cfg.slim_width_px;

    format!(
        r#"{side}, {grid} {{
    transition: all 0.2s ease-in-out !important;
}}

body.{marker} {side} {{
    width: {width}px !important;
    flex: 0 0 {width}px !important;
    min-width: {width}px !important;
}}

body.{marker} {grid} {{
    grid-template-columns: {width}px 1fr !important;
}}

body.{marker} {side} div[role="search"],
body.{marker} {side} div[contenteditable="true"] {{
    display: none !important;
}}

body.{marker} {side} div[role="listitem"] > div > div:last-child {{
    display: none !important;
}}

body.{marker} {side} div[role="listitem"] > div {{
    justify-content: center !important;
    padding-left: 0 !important;
    padding-right: 0 !important;
}}

#{control} {{
    cursor: pointer;
    padding: 8px 12px;
    display: flex;
    align-items: center;
    justify-content: center;
    opacity: 0.8;
}}

#{control}:hover {{
    opacity: 1;
    background-color: rgba(128, 128, 128, 0.1);
    border-radius: 50%;
}}
"#
    )
}

/// Insert the stylesheet into the document head, keyed by element id so a
/// second install is a no-op.
pub fn install_stylesheet(doc: &mut Document, cfg: &PanelConfig) {
    if doc.element_by_id(&cfg.style_id).is_some() {
        return;
    }
    let style = doc.create_element("style");
    doc.set_attr(style, "id", Some(&cfg.style_id));
    let css = doc.create_text(&slim_stylesheet(cfg));
    let _ = doc.append_child(style, css);
    let _ = doc.append_child(doc.head(), style);
    log::debug!(target: "panel.styles", "presentation rules installed");
}
