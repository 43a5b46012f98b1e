//! Widget tree
//!
//! A bounded arena of widgets. Ids are arena indices, a widget's parent
//! always precedes it, and creation order is draw order - so one forward
//! pass paints parents under their children, and one reverse pass resolves
//! content sizes before the containers that wrap them.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::{String, Vec};

use crate::style::Theme;
use crate::ui::UiError;

/// Maximum widgets in one tree.
pub const MAX_WIDGETS: usize = 16;

/// Maximum label text length in bytes.
pub const MAX_LABEL_LEN: usize = 64;

/// Button content padding in pixels (horizontal, vertical).
const BUTTON_PADDING: (u32, u32) = (14, 10);

/// Button corner radius in pixels.
const BUTTON_RADIUS: u32 = 6;

/// Handle to a widget in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WidgetId(pub(crate) usize);

/// Placement of a widget within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    /// Parent's top-left corner (the default).
    #[default]
    TopLeft,
    /// Centered in both axes.
    Center,
}

pub(crate) enum WidgetKind {
    /// Root surface covering the whole display.
    Screen,
    /// Clickable rounded rectangle sized to its content.
    Button { pressed: bool },
    /// Monospaced text sized from glyph metrics.
    Label { text: String<MAX_LABEL_LEN> },
}

pub(crate) struct Widget {
    pub kind: WidgetKind,
    pub parent: Option<WidgetId>,
    pub align: Align,
    /// Bounds resolved by the last layout pass.
    pub bounds: Rectangle,
}

/// The widget arena. Index 0 is always the screen.
pub(crate) struct WidgetTree {
    widgets: Vec<Widget, MAX_WIDGETS>,
}

impl WidgetTree {
    pub fn new() -> Self {
        let mut widgets: Vec<Widget, MAX_WIDGETS> = Vec::new();
        // Capacity is nonzero, the root always fits
        let _ = widgets.push(Widget {
            kind: WidgetKind::Screen,
            parent: None,
            align: Align::TopLeft,
            bounds: Rectangle::zero(),
        });
        Self { widgets }
    }

    /// The root screen widget.
    pub fn root(&self) -> WidgetId {
        WidgetId(0)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    fn create(&mut self, kind: WidgetKind, parent: WidgetId) -> Result<WidgetId, UiError> {
        if parent.0 >= self.widgets.len() {
            return Err(UiError::UnknownWidget);
        }
        let id = WidgetId(self.widgets.len());
        self.widgets
            .push(Widget {
                kind,
                parent: Some(parent),
                align: Align::TopLeft,
                bounds: Rectangle::zero(),
            })
            .map_err(|_| UiError::TreeFull)?;
        Ok(id)
    }

    pub fn create_button(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.create(WidgetKind::Button { pressed: false }, parent)
    }

    pub fn create_label(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.create(WidgetKind::Label { text: String::new() }, parent)
    }

    /// Replace a label's text, truncating at capacity.
    pub fn set_label_text(&mut self, id: WidgetId, text: &str) -> Result<(), UiError> {
        let widget = self.widgets.get_mut(id.0).ok_or(UiError::UnknownWidget)?;
        match &mut widget.kind {
            WidgetKind::Label { text: stored } => {
                stored.clear();
                for ch in text.chars() {
                    if stored.push(ch).is_err() {
                        break;
                    }
                }
                Ok(())
            }
            _ => Err(UiError::KindMismatch),
        }
    }

    pub fn set_align(&mut self, id: WidgetId, align: Align) -> Result<(), UiError> {
        let widget = self.widgets.get_mut(id.0).ok_or(UiError::UnknownWidget)?;
        widget.align = align;
        Ok(())
    }

    pub fn set_pressed(&mut self, id: WidgetId, pressed: bool) {
        if let Some(widget) = self.widgets.get_mut(id.0) {
            if let WidgetKind::Button { pressed: state } = &mut widget.kind {
                *state = pressed;
            }
        }
    }

    pub fn bounds(&self, id: WidgetId) -> Option<Rectangle> {
        self.widgets.get(id.0).map(|w| w.bounds)
    }

    /// Topmost button under the point, if any.
    ///
    /// Later-created widgets draw on top, so the reverse scan wins ties.
    pub fn hit_test(&self, point: Point) -> Option<WidgetId> {
        for (idx, widget) in self.widgets.iter().enumerate().rev() {
            if let WidgetKind::Button { .. } = widget.kind {
                if widget.bounds.contains(point) {
                    return Some(WidgetId(idx));
                }
            }
        }
        None
    }

    /// Resolve every widget's bounds for the given screen size.
    ///
    /// Sizes run in reverse creation order (children before the buttons
    /// that wrap them), positions in creation order (parents first).
    pub fn layout(&mut self, screen: Size) {
        for idx in (0..self.widgets.len()).rev() {
            let size = match &self.widgets[idx].kind {
                WidgetKind::Screen => screen,
                WidgetKind::Label { text } => label_size(text.as_str()),
                WidgetKind::Button { .. } => {
                    let content = self.content_size(WidgetId(idx));
                    Size::new(
                        content.width + 2 * BUTTON_PADDING.0,
                        content.height + 2 * BUTTON_PADDING.1,
                    )
                }
            };
            self.widgets[idx].bounds.size = size;
        }

        for idx in 0..self.widgets.len() {
            let top_left = match self.widgets[idx].parent {
                None => Point::zero(),
                Some(parent) => {
                    let parent_bounds = self.widgets[parent.0].bounds;
                    let size = self.widgets[idx].bounds.size;
                    match self.widgets[idx].align {
                        Align::TopLeft => parent_bounds.top_left,
                        Align::Center => centered(parent_bounds, size),
                    }
                }
            };
            self.widgets[idx].bounds.top_left = top_left;
        }
    }

    /// Largest child size; zero when the widget has no children.
    fn content_size(&self, id: WidgetId) -> Size {
        let mut content = Size::zero();
        for widget in &self.widgets {
            if widget.parent == Some(id) {
                content.width = content.width.max(widget.bounds.size.width);
                content.height = content.height.max(widget.bounds.size.height);
            }
        }
        content
    }

    /// Paint the tree into the target, creation order, parents first.
    pub fn draw<D: DrawTarget<Color = Rgb888>>(&self, target: &mut D, theme: &Theme) {
        for widget in &self.widgets {
            match &widget.kind {
                WidgetKind::Screen => {}
                WidgetKind::Button { pressed } => {
                    let fill = if *pressed {
                        theme.button_pressed
                    } else {
                        theme.button
                    };
                    RoundedRectangle::with_equal_corners(
                        widget.bounds,
                        Size::new(BUTTON_RADIUS, BUTTON_RADIUS),
                    )
                    .into_styled(PrimitiveStyle::with_fill(fill))
                    .draw(target)
                    .ok();
                }
                WidgetKind::Label { text } => {
                    Text::with_baseline(
                        text.as_str(),
                        widget.bounds.top_left,
                        MonoTextStyle::new(&FONT_6X10, theme.text),
                        Baseline::Top,
                    )
                    .draw(target)
                    .ok();
                }
            }
        }
    }
}

/// Center `size` within `parent`, clamped to the parent's origin when the
/// child is larger.
fn centered(parent: Rectangle, size: Size) -> Point {
    let dx = (parent.size.width.saturating_sub(size.width) / 2) as i32;
    let dy = (parent.size.height.saturating_sub(size.height) / 2) as i32;
    Point::new(parent.top_left.x + dx, parent.top_left.y + dy)
}

/// Glyph-metric size of a label's text.
fn label_size(text: &str) -> Size {
    let glyph = FONT_6X10.character_size;
    let chars = text.chars().count() as u32;
    Size::new(chars * glyph.width, glyph.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out_tree() -> (WidgetTree, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let btn = tree.create_button(tree.root()).unwrap();
        let lbl = tree.create_label(btn).unwrap();
        tree.set_label_text(lbl, "Hello world!").unwrap();
        tree.set_align(lbl, Align::Center).unwrap();
        tree.set_align(btn, Align::Center).unwrap();
        tree.layout(Size::new(480, 320));
        (tree, btn, lbl)
    }

    #[test]
    fn test_root_is_screen() {
        let tree = WidgetTree::new();
        assert_eq!(tree.root(), WidgetId(0));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_create_links_parent() {
        let mut tree = WidgetTree::new();
        let btn = tree.create_button(tree.root()).unwrap();
        let lbl = tree.create_label(btn).unwrap();
        assert_eq!(tree.widgets[lbl.0].parent, Some(btn));
    }

    #[test]
    fn test_create_rejects_unknown_parent() {
        let mut tree = WidgetTree::new();
        assert_eq!(
            tree.create_button(WidgetId(7)),
            Err(UiError::UnknownWidget)
        );
    }

    #[test]
    fn test_tree_full() {
        let mut tree = WidgetTree::new();
        for _ in 0..MAX_WIDGETS - 1 {
            tree.create_label(tree.root()).unwrap();
        }
        assert_eq!(tree.create_label(tree.root()), Err(UiError::TreeFull));
    }

    #[test]
    fn test_set_text_on_button_is_rejected() {
        let mut tree = WidgetTree::new();
        let btn = tree.create_button(tree.root()).unwrap();
        assert_eq!(tree.set_label_text(btn, "nope"), Err(UiError::KindMismatch));
    }

    #[test]
    fn test_label_text_truncates_at_capacity() {
        let mut tree = WidgetTree::new();
        let lbl = tree.create_label(tree.root()).unwrap();
        let long = "x".repeat(MAX_LABEL_LEN + 10);
        tree.set_label_text(lbl, &long).unwrap();
        if let WidgetKind::Label { text } = &tree.widgets[lbl.0].kind {
            assert_eq!(text.len(), MAX_LABEL_LEN);
        } else {
            panic!("expected a label");
        }
    }

    #[test]
    fn test_label_sized_from_glyphs() {
        // 12 chars of the 6x10 font
        assert_eq!(label_size("Hello world!"), Size::new(72, 10));
        assert_eq!(label_size(""), Size::new(0, 10));
    }

    #[test]
    fn test_button_wraps_label_with_padding() {
        let (tree, btn, lbl) = laid_out_tree();
        let btn_size = tree.bounds(btn).unwrap().size;
        let lbl_size = tree.bounds(lbl).unwrap().size;
        assert_eq!(btn_size.width, lbl_size.width + 2 * BUTTON_PADDING.0);
        assert_eq!(btn_size.height, lbl_size.height + 2 * BUTTON_PADDING.1);
    }

    #[test]
    fn test_centering() {
        let (tree, btn, lbl) = laid_out_tree();
        let btn_bounds = tree.bounds(btn).unwrap();
        // 480x320 screen, 100x30 button -> top-left (190, 145)
        assert_eq!(btn_bounds.size, Size::new(100, 30));
        assert_eq!(btn_bounds.top_left, Point::new(190, 145));
        // Label centered inside the button
        let lbl_bounds = tree.bounds(lbl).unwrap();
        assert_eq!(lbl_bounds.top_left, Point::new(190 + 14, 145 + 10));
    }

    #[test]
    fn test_centering_child_larger_than_parent_clamps() {
        let parent = Rectangle::new(Point::new(10, 10), Size::new(20, 20));
        assert_eq!(centered(parent, Size::new(50, 50)), Point::new(10, 10));
    }

    #[test]
    fn test_hit_test_finds_button_only() {
        let (tree, btn, _) = laid_out_tree();
        let inside = Point::new(240, 160);
        let outside = Point::new(5, 5);
        assert_eq!(tree.hit_test(inside), Some(btn));
        // The screen is under the point but is not clickable
        assert_eq!(tree.hit_test(outside), None);
    }

    #[test]
    fn test_hit_test_before_layout_misses() {
        let mut tree = WidgetTree::new();
        tree.create_button(tree.root()).unwrap();
        assert_eq!(tree.hit_test(Point::new(0, 0)), None);
    }
}
