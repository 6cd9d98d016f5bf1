use crate::{Document, NodeId};

/// Indented one-line-per-node dump of a subtree, capped at `cap` lines.
/// Debug aid for the demo driver and for eyeballing test failures.
pub fn outline(doc: &Document, from: NodeId, cap: usize) -> Vec<String> {
    fn walk(doc: &Document, id: NodeId, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = "  ".repeat(depth);
        if let Some(name) = doc.element_name(id) {
            let mut line = format!("{indent}<{name}");
            if let Some(dom_id) = doc.attr(id, "id") {
                line.push_str(&format!(r#" id="{dom_id}""#));
            }
            if let Some(class) = doc.attr(id, "class") {
                line.push_str(&format!(r#" class="{class}""#));
            }
            line.push('>');
            out.push(line);
            for &child in doc.children(id) {
                walk(doc, child, depth + 1, out, left);
            }
        } else if let Some(text) = doc.text(id) {
            let t = text.replace('\n', " ").trim().to_string();
            if t.is_empty() {
                return;
            }
            let show = if t.chars().count() > 40 {
                let cut: String = t.chars().take(40).collect();
                format!("{cut}…")
            } else {
                t
            };
            out.push(format!("{indent}\"{show}\""));
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(doc, from, 0, &mut out, &mut left);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_shows_structure_and_truncates_long_text() {
        let mut doc = Document::new();
        let panel = doc.create_element("div");
        doc.set_attr(panel, "class", Some("side-panel"));
        let label = doc.create_text(&"x".repeat(60));
        doc.append_child(panel, label).unwrap();
        doc.append_child(doc.body(), panel).unwrap();

        let lines = outline(&doc, doc.root(), 100);
        assert_eq!(lines[0], "<html>");
        assert!(lines.iter().any(|l| l.contains(r#"<div class="side-panel">"#)));
        assert!(lines.iter().any(|l| l.ends_with("…\"")));
    }

    #[test]
    fn outline_respects_the_line_cap() {
        let mut doc = Document::new();
        for _ in 0..20 {
            let d = doc.create_element("div");
            doc.append_child(doc.body(), d).unwrap();
        }
        assert_eq!(outline(&doc, doc.root(), 5).len(), 5);
    }
}
