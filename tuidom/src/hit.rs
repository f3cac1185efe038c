use crate::element::Element;
use crate::layout::LayoutResult;
use crate::types::Position;

/// Find the deepest clickable element at the given coordinates.
/// Returns None if no clickable element contains the point.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_test_element(layout, root, x, y, &|e| e.clickable && !e.disabled)
}

/// Find any element (clickable or not) at the given coordinates.
/// Returns the deepest element containing the point.
pub fn hit_test_any(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_test_element(layout, root, x, y, &|_| true)
}

/// Find the focusable element at the given coordinates.
pub fn hit_test_focusable(
    layout: &LayoutResult,
    root: &Element,
    x: u16,
    y: u16,
) -> Option<String> {
    hit_test_element(layout, root, x, y, &|e| e.focusable && !e.disabled)
}

fn hit_test_element(
    layout: &LayoutResult,
    root: &Element,
    x: u16,
    y: u16,
    accept: &dyn Fn(&Element) -> bool,
) -> Option<String> {
    // Overlays sit above the normal flow, highest z first. Among equal z,
    // the one declared last was painted last.
    let mut overlays = Vec::new();
    collect_overlays(root, &mut overlays);
    overlays.reverse();
    overlays.sort_by_key(|o| std::cmp::Reverse(o.z_index));

    // A point covered by an overlay never falls through to what lies beneath.
    for overlay in overlays {
        if layout.get(&overlay.id).is_some_and(|r| r.contains(x, y)) {
            return hit_test_flow(layout, overlay, x, y, accept);
        }
    }

    hit_test_flow(layout, root, x, y, accept)
}

fn collect_overlays<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    for child in element.child_elements() {
        if child.position == Position::Absolute {
            out.push(child);
        }
        collect_overlays(child, out);
    }
}

fn hit_test_flow(
    layout: &LayoutResult,
    element: &Element,
    x: u16,
    y: u16,
    accept: &dyn Fn(&Element) -> bool,
) -> Option<String> {
    let rect = layout.get(&element.id)?;
    if !rect.contains(x, y) {
        return None;
    }

    // Check children in reverse order (last rendered = on top)
    for child in element
        .child_elements()
        .iter()
        .rev()
        .filter(|c| c.position != Position::Absolute)
    {
        if let Some(id) = hit_test_flow(layout, child, x, y, accept) {
            return Some(id);
        }
    }

    if accept(element) {
        Some(element.id.clone())
    } else {
        None
    }
}
