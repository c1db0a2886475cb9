//! View tree management
//!
//! Views live in a slotmap keyed by [`ViewId`]. A view is either a
//! container (a scroll view, laid out by its engine) or content. Content
//! views are mirrored into a Taffy tree so arbitrary flex content has an
//! intrinsic size; their frames below the content root come from Taffy.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use taffy::{AvailableSpace, NodeId, TaffyTree};

use hscroll_core::{EdgeInsets, LayoutDirection, MeasureMode, MeasureSpec, Rect, Size};

use crate::error::{Error, Result};
use crate::params::{generate_default_layout_params, LayoutParams};

new_key_type! {
    pub struct ViewId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// Scroll container, sized by its engine
    Container,
    /// Content backed by a Taffy node
    Content(NodeId),
}

#[derive(Clone, Debug)]
pub struct ViewNode {
    kind: ViewKind,
    parent: Option<ViewId>,
    children: SmallVec<[ViewId; 4]>,
    params: LayoutParams,
    measured: Size,
    /// Frame in the parent's content coordinates
    frame: Rect,
    scroll: (i32, i32),
    padding: EdgeInsets,
    min_size: Size,
    direction: LayoutDirection,
    attached: bool,
    layout_requested: bool,
}

impl ViewNode {
    fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            parent: None,
            children: SmallVec::new(),
            params: generate_default_layout_params(),
            measured: Size::ZERO,
            frame: Rect::ZERO,
            scroll: (0, 0),
            padding: EdgeInsets::ZERO,
            min_size: Size::ZERO,
            direction: LayoutDirection::Ltr,
            attached: false,
            layout_requested: false,
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    pub fn children(&self) -> &[ViewId] {
        &self.children
    }
}

pub struct ViewTree {
    taffy: TaffyTree,
    views: SlotMap<ViewId, ViewNode>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            views: SlotMap::with_key(),
        }
    }

    /// Create a container view with a suggested minimum size
    pub fn create_container(&mut self, min_size: Size) -> ViewId {
        let mut node = ViewNode::new(ViewKind::Container);
        node.min_size = min_size;
        self.views.insert(node)
    }

    /// Create a content view with the given Taffy style
    pub fn create_content(&mut self, style: taffy::Style) -> Result<ViewId> {
        let taffy_node = self.taffy.new_leaf(style)?;
        Ok(self.views.insert(ViewNode::new(ViewKind::Content(taffy_node))))
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(id)
    }

    pub fn get(&self, id: ViewId) -> Option<&ViewNode> {
        self.views.get(id)
    }

    fn node(&self, id: ViewId) -> Result<&ViewNode> {
        self.views.get(id).ok_or(Error::UnknownView(id))
    }

    fn node_mut(&mut self, id: ViewId) -> Result<&mut ViewNode> {
        self.views.get_mut(id).ok_or(Error::UnknownView(id))
    }

    fn taffy_node(&self, id: ViewId) -> Result<NodeId> {
        match self.node(id)?.kind {
            ViewKind::Content(node) => Ok(node),
            ViewKind::Container => Err(Error::NotContent(id)),
        }
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    ///
    /// Only content views can be children.
    pub fn add_child(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        let child_node = self.taffy_node(child)?;
        let parent_kind = self.node(parent)?.kind;

        if let Some(old_parent) = self.node(child)?.parent {
            self.remove_child(old_parent, child)?;
        }
        if let ViewKind::Content(parent_node) = parent_kind {
            self.taffy.add_child(parent_node, child_node)?;
        }

        let attached = self.node(parent)?.attached;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        self.set_attached(child, attached);
        self.request_layout(parent);
        Ok(())
    }

    pub fn remove_child(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        let parent_kind = self.node(parent)?.kind;
        let child_kind = self.node(child)?.kind;

        if let (ViewKind::Content(parent_node), ViewKind::Content(child_node)) =
            (parent_kind, child_kind)
        {
            self.taffy.remove_child(parent_node, child_node)?;
        }

        self.node_mut(parent)?.children.retain(|c| *c != child);
        self.node_mut(child)?.parent = None;
        self.set_attached(child, false);
        self.request_layout(parent);
        Ok(())
    }

    /// Remove a view and its whole subtree
    pub fn remove(&mut self, id: ViewId) -> Result<()> {
        if let Some(parent) = self.node(id)?.parent {
            self.remove_child(parent, id)?;
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.views.remove(current) {
                stack.extend(node.children.iter().copied());
                if let ViewKind::Content(taffy_node) = node.kind {
                    self.taffy.remove(taffy_node)?;
                }
            }
        }
        Ok(())
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.views.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.views
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_style(&mut self, id: ViewId, style: taffy::Style) -> Result<()> {
        let node = self.taffy_node(id)?;
        self.taffy.set_style(node, style)?;
        self.request_layout(id);
        Ok(())
    }

    // =========================================================================
    // Layout parameters
    // =========================================================================

    pub fn params(&self, id: ViewId) -> Option<&LayoutParams> {
        self.views.get(id).map(|node| &node.params)
    }

    pub fn set_params(&mut self, id: ViewId, params: LayoutParams) -> Result<()> {
        self.node_mut(id)?.params = params;
        self.request_layout(id);
        Ok(())
    }

    /// Mutable parameters, without requesting a layout
    pub(crate) fn params_mut(&mut self, id: ViewId) -> Option<&mut LayoutParams> {
        self.views.get_mut(id).map(|node| &mut node.params)
    }

    // =========================================================================
    // Measure & Layout
    // =========================================================================

    /// Measure a content view against the given specs
    pub fn measure(&mut self, id: ViewId, width: MeasureSpec, height: MeasureSpec) -> Result<Size> {
        let node = self.taffy_node(id)?;
        let exact = |spec: MeasureSpec| (spec.mode == MeasureMode::Exact).then_some(spec.size);

        let computed = self.compute(node, exact(width), exact(height), width, height)?;
        let measured = Size::new(width.resolve(computed.width), height.resolve(computed.height));

        tracing::trace!(?id, ?width, ?height, ?measured, "measured content");
        self.node_mut(id)?.measured = measured;
        Ok(measured)
    }

    /// Give a content root its final frame and lay out its subtree to match
    pub fn layout(&mut self, id: ViewId, frame: Rect) -> Result<()> {
        let node = self.taffy_node(id)?;
        let size = frame.size();
        self.compute(
            node,
            Some(size.width),
            Some(size.height),
            MeasureSpec::exact(size.width),
            MeasureSpec::exact(size.height),
        )?;
        self.set_frame(id, frame);
        Ok(())
    }

    /// Run Taffy on `node`, forcing its size on the axes given.
    ///
    /// The node's own style is put back afterwards.
    fn compute(
        &mut self,
        node: NodeId,
        width: Option<i32>,
        height: Option<i32>,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
    ) -> Result<Size> {
        let style = self.taffy.style(node)?.clone();

        let mut forced = style.clone();
        if let Some(width) = width {
            forced.size.width = taffy::Dimension::Length(width as f32);
        }
        if let Some(height) = height {
            forced.size.height = taffy::Dimension::Length(height as f32);
        }

        self.taffy.set_style(node, forced)?;
        let result = self.taffy.compute_layout(
            node,
            taffy::Size {
                width: available_space(width_spec),
                height: available_space(height_spec),
            },
        );
        self.taffy.set_style(node, style)?;
        result?;

        let size = self.taffy.layout(node)?.size;
        Ok(Size::new(size.width.round() as i32, size.height.round() as i32))
    }

    pub fn measured_size(&self, id: ViewId) -> Size {
        match self.views.get(id) {
            Some(node) => node.measured,
            None => {
                tracing::warn!(?id, "measured size of unknown view");
                Size::ZERO
            }
        }
    }

    pub fn set_measured_size(&mut self, id: ViewId, size: Size) {
        if let Some(node) = self.views.get_mut(id) {
            node.measured = size;
        }
    }

    /// Frame of a view in its parent's content coordinates.
    ///
    /// Views nested inside content take their frame from Taffy.
    pub fn frame(&self, id: ViewId) -> Rect {
        let Some(node) = self.views.get(id) else {
            tracing::warn!(?id, "frame of unknown view");
            return Rect::ZERO;
        };

        let nested = node
            .parent
            .and_then(|parent| self.views.get(parent))
            .is_some_and(|parent| matches!(parent.kind, ViewKind::Content(_)));

        match node.kind {
            ViewKind::Content(taffy_node) if nested => match self.taffy.layout(taffy_node) {
                Ok(layout) => Rect::from_origin_size(
                    layout.location.x.round() as i32,
                    layout.location.y.round() as i32,
                    Size::new(
                        layout.size.width.round() as i32,
                        layout.size.height.round() as i32,
                    ),
                ),
                Err(err) => {
                    tracing::warn!(?id, %err, "no layout for nested content");
                    Rect::ZERO
                }
            },
            _ => node.frame,
        }
    }

    pub fn set_frame(&mut self, id: ViewId, frame: Rect) {
        if let Some(node) = self.views.get_mut(id) {
            node.frame = frame;
        }
    }

    /// Rectangle of `id` in the content coordinates of `ancestor`.
    ///
    /// None when `id` is not below `ancestor`.
    pub fn rect_in_ancestor(&self, id: ViewId, ancestor: ViewId) -> Option<Rect> {
        let mut rect = self.frame(id);
        let mut current = self.parent(id)?;

        while current != ancestor {
            let frame = self.frame(current);
            let (scroll_x, scroll_y) = self.scroll(current);
            rect.offset(frame.left - scroll_x, frame.top - scroll_y);
            current = self.parent(current)?;
        }
        Some(rect)
    }

    pub fn is_descendant_of(&self, id: ViewId, ancestor: ViewId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    // =========================================================================
    // View properties
    // =========================================================================

    pub fn padding(&self, id: ViewId) -> EdgeInsets {
        self.views
            .get(id)
            .map(|node| node.padding)
            .unwrap_or_default()
    }

    pub fn set_padding(&mut self, id: ViewId, padding: EdgeInsets) {
        if let Some(node) = self.views.get_mut(id) {
            node.padding = padding;
        }
    }

    pub fn min_size(&self, id: ViewId) -> Size {
        self.views
            .get(id)
            .map(|node| node.min_size)
            .unwrap_or_default()
    }

    pub fn scroll(&self, id: ViewId) -> (i32, i32) {
        self.views.get(id).map(|node| node.scroll).unwrap_or_default()
    }

    pub fn set_scroll(&mut self, id: ViewId, x: i32, y: i32) {
        if let Some(node) = self.views.get_mut(id) {
            node.scroll = (x, y);
        }
    }

    pub fn direction(&self, id: ViewId) -> LayoutDirection {
        self.views
            .get(id)
            .map(|node| node.direction)
            .unwrap_or_default()
    }

    pub fn set_direction(&mut self, id: ViewId, direction: LayoutDirection) {
        if let Some(node) = self.views.get_mut(id) {
            node.direction = direction;
        }
    }

    // =========================================================================
    // Attachment & layout requests
    // =========================================================================

    pub fn is_attached(&self, id: ViewId) -> bool {
        self.views.get(id).is_some_and(|node| node.attached)
    }

    /// Mark a view and its subtree attached or detached
    pub fn set_attached(&mut self, id: ViewId, attached: bool) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.views.get_mut(current) {
                node.attached = attached;
                stack.extend(node.children.iter().copied());
            }
        }
    }

    /// Flag `id` and its ancestors as needing layout
    pub fn request_layout(&mut self, id: ViewId) {
        let mut current = Some(id);
        while let Some(view) = current {
            match self.views.get_mut(view) {
                Some(node) => {
                    node.layout_requested = true;
                    current = node.parent;
                }
                None => break,
            }
        }
    }

    pub fn is_layout_requested(&self, id: ViewId) -> bool {
        self.views.get(id).is_some_and(|node| node.layout_requested)
    }

    /// Clear the layout request flag, returning its previous value
    pub fn take_layout_request(&mut self, id: ViewId) -> bool {
        self.views
            .get_mut(id)
            .map(|node| std::mem::take(&mut node.layout_requested))
            .unwrap_or(false)
    }
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

fn available_space(spec: MeasureSpec) -> AvailableSpace {
    match spec.mode {
        MeasureMode::Unspecified => AvailableSpace::MaxContent,
        MeasureMode::AtMost | MeasureMode::Exact => AvailableSpace::Definite(spec.size as f32),
    }
}
