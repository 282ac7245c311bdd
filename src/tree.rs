//
// Copyright 2023-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use crate::layout::resolve;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle to a widget stored in a [`WidgetTree`].
pub struct WidgetId(usize);

impl WidgetId {
    /// Arena slot of the widget.
    pub fn index(self) -> usize { self.0 }
}

#[derive(Debug)]
/// A widget together with its layout properties and tree links.
pub struct Node {
    /// Layout properties.
    pub element: Element,
    /// The widget itself.
    pub widget: Widget,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
}

/// Most notifications a [`WidgetTree`] holds between drains; older ones are dropped first.
pub const MAX_PENDING_NOTIFICATIONS: usize = 4096;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// A [`WidgetEvent`] tagged with the widget that raised it.
pub struct Notification {
    /// Widget that raised the event.
    pub widget: WidgetId,
    /// What happened.
    pub event: WidgetEvent,
}

/// Single-rooted arena of widgets.
///
/// Widgets live for as long as the tree does; [`WidgetTree::remove_child`] only detaches a
/// subtree, which can be attached again later. Each widget has at most one parent and the tree
/// refuses links that would form a cycle. Geometry is not stored on the nodes: [`layout`]
/// produces a fresh [`LayoutTable`] that the dispatch and render passes read from.
///
/// [`layout`]: WidgetTree::layout
#[derive(Debug)]
pub struct WidgetTree {
    nodes: Vec<Node>,
    root: WidgetId,
    notifications: Vec<Notification>,
    scratch: Vec<WidgetEvent>,
}

impl WidgetTree {
    /// Creates a tree holding only its root.
    pub fn new(element: Element, widget: impl Into<Widget>) -> Self {
        Self {
            nodes: vec![Node {
                element,
                widget: widget.into(),
                parent: None,
                children: Vec::new(),
            }],
            root: WidgetId(0),
            notifications: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// The root widget.
    pub fn root(&self) -> WidgetId { self.root }

    /// Number of widgets, attached or not.
    pub fn len(&self) -> usize { self.nodes.len() }

    /// Always `false`: a tree has at least its root.
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Stores a detached widget and returns its handle.
    pub fn add(&mut self, element: Element, widget: impl Into<Widget>) -> WidgetId {
        let id = WidgetId(self.nodes.len());
        self.nodes.push(Node {
            element,
            widget: widget.into(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Stores a widget and appends it to `parent`'s children.
    pub fn add_to(&mut self, parent: WidgetId, element: Element, widget: impl Into<Widget>) -> GuiResult<WidgetId> {
        self.check(parent)?;
        let id = self.add(element, widget);
        self.add_child(parent, id)?;
        Ok(id)
    }

    /// Appends `child` to `parent`'s children, detaching it from its previous parent first.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> GuiResult<()> {
        self.check(parent)?;
        self.check(child)?;
        if child == self.root {
            return Err(GuiError::InvalidOperation("the root cannot become a child"));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(GuiError::InvalidOperation("a widget cannot be attached below itself"));
        }
        if let Some(old) = self.nodes[child.0].parent {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Detaches `child` from `parent`. Returns `false` if it was not one of its children.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        let Some(node) = self.nodes.get_mut(parent.0) else {
            return false;
        };
        let before = node.children.len();
        node.children.retain(|c| *c != child);
        if node.children.len() == before {
            return false;
        }
        self.nodes[child.0].parent = None;
        true
    }

    /// Parent of `id`, `None` for the root and detached widgets.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> { self.nodes.get(id.0).and_then(|n| n.parent) }

    /// Children of `id` in render order.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] { self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or(&[]) }

    /// Node for `id`.
    pub fn node(&self, id: WidgetId) -> Option<&Node> { self.nodes.get(id.0) }

    /// Mutable node for `id`.
    pub fn node_mut(&mut self, id: WidgetId) -> Option<&mut Node> { self.nodes.get_mut(id.0) }

    /// Widget for `id`.
    pub fn widget(&self, id: WidgetId) -> Option<&Widget> { self.node(id).map(|n| &n.widget) }

    /// Mutable widget for `id`.
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> { self.node_mut(id).map(|n| &mut n.widget) }

    /// Layout properties for `id`.
    pub fn element(&self, id: WidgetId) -> Option<&Element> { self.node(id).map(|n| &n.element) }

    /// Mutable layout properties for `id`.
    pub fn element_mut(&mut self, id: WidgetId) -> Option<&mut Element> { self.node_mut(id).map(|n| &mut n.element) }

    fn check(&self, id: WidgetId) -> GuiResult<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(GuiError::InvalidArgument(format!("unknown widget id {}", id.0)))
        }
    }

    fn is_ancestor_or_self(&self, ancestor: WidgetId, mut id: WidgetId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.nodes[id.0].parent {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    /// Visible widgets reachable from the root, parents before children.
    fn visible_preorder(&self) -> Vec<WidgetId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.element.visible {
                continue;
            }
            order.push(id);
            stack.extend(node.children.iter().rev());
        }
        order
    }

    /// Resolves the geometry of every visible widget against `viewport`.
    ///
    /// The root lays out inside the viewport; every other widget lays out inside its parent's
    /// content box. The pass reads the tree only, so two calls with the same viewport on an
    /// unchanged tree give identical tables.
    pub fn layout(&self, viewport: Dimensioni) -> LayoutTable {
        let mut table = LayoutTable::with_capacity(viewport, self.nodes.len());
        let mut stack = vec![(self.root, viewport, vec2(0, 0))];
        while let Some((id, parent, origin)) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.element.visible {
                continue;
            }
            let r = resolve(&node.element, parent, origin, node.widget.intrinsic_size(&node.element));
            let inner = Dimensioni::new(r.content.width, r.content.height);
            let inner_origin = vec2(r.content.x, r.content.y);
            table.set(id, r);
            for child in node.children.iter().rev() {
                stack.push((*child, inner, inner_origin));
            }
        }
        table
    }

    /// Surface position of `id`'s top-left corner for the frame `layout` describes.
    pub fn global_position(&self, layout: &LayoutTable, id: WidgetId) -> Option<Vec2i> { layout.get(id).map(|r| vec2(r.bounds.x, r.bounds.y)) }

    /// Hands `event` to every visible widget in pre-order. Nothing consumes an event, so
    /// overlapping widgets can all react to the same click.
    ///
    /// Raised notifications queue up until [`WidgetTree::drain_notifications`] is called; at most
    /// [`MAX_PENDING_NOTIFICATIONS`] are kept.
    pub fn dispatch(&mut self, layout: &LayoutTable, event: &GuiEvent, style: &Style) {
        for id in self.visible_preorder() {
            let Some(r) = layout.get(id) else {
                continue;
            };
            self.nodes[id.0].widget.handle_event(r, event, style, &mut self.scratch);
            self.notifications.extend(self.scratch.drain(..).map(|event| Notification { widget: id, event }));
        }
        if self.notifications.len() > MAX_PENDING_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_PENDING_NOTIFICATIONS;
            log::debug!("dropping {} undrained notifications", excess);
            self.notifications.drain(..excess);
        }
    }

    /// Draws every visible widget in pre-order, so children paint over their parents.
    pub fn render(&mut self, gui: &mut GuiService, layout: &LayoutTable, dt: f32) -> GuiResult<()> {
        for id in self.visible_preorder() {
            let Some(r) = layout.get(id) else {
                continue;
            };
            let node = &mut self.nodes[id.0];
            node.widget.render(gui, r, dt)?;
            if node.element.debug {
                let clr = gui.style().color(ControlColor::Debug);
                gui.draw_box(r.bounds, clr, 1)?;
            }
        }
        Ok(())
    }

    /// Pending notifications, oldest first.
    pub fn notifications(&self) -> &[Notification] { &self.notifications }

    /// Takes every pending notification. Call once per frame after dispatching.
    pub fn drain_notifications(&mut self) -> Vec<Notification> { std::mem::take(&mut self.notifications) }
}
