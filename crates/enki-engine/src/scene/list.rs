use super::{DrawCmd, SortKey, ZIndex};

/// One recorded command plus the key it sorts by.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Per-frame command stream consumed by the shape renderers.
///
/// Recording appends in O(1). The back-to-front permutation is computed
/// lazily on the first paint-order iteration after a change, then cached.
/// `clear` keeps both vector allocations, so a warmed list records whole
/// frames without touching the allocator.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    paint_order: Vec<u32>,
    order_stale: bool,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all recorded items, retaining capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.paint_order.clear();
        self.order_stale = true;
    }

    /// Recorded items in recording order.
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Appends `cmd` on layer `z`, after everything already on that layer.
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey::new(z, self.items.len() as u32);
        self.items.push(DrawItem { key, cmd });
        self.order_stale = true;
    }

    /// Visits items back to front: ascending layer, recording order within
    /// a layer.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.order_stale {
            self.paint_order.clear();
            self.paint_order.extend(0..self.items.len() as u32);
            let items = &self.items;
            // Keys embed the unique sequence number, so the unstable sort
            // never sees equal elements.
            self.paint_order.sort_unstable_by_key(|&i| items[i as usize].key);
            self.order_stale = false;
        }
        self.paint_order.iter().map(|&i| &self.items[i as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    fn r(x: f32) -> Rect {
        Rect::new(x, 0.0, 1.0, 1.0)
    }

    fn ink() -> Color {
        Color::from_straight(1.0, 0.0, 0.0, 1.0)
    }

    fn layers(list: &mut DrawList) -> Vec<i32> {
        list.iter_in_paint_order().map(|item| item.key.z.0).collect()
    }

    #[test]
    fn paints_ascending_layers() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(2), r(0.0), ink());
        list.push_solid_rect(ZIndex(0), r(0.0), ink());
        list.push_solid_rect(ZIndex(-1), r(0.0), ink());
        list.push_solid_rect(ZIndex(1), r(0.0), ink());
        assert_eq!(layers(&mut list), vec![-1, 0, 1, 2]);
    }

    #[test]
    fn same_layer_keeps_recording_order() {
        let mut list = DrawList::new();
        for x in [0.0, 1.0, 2.0] {
            list.push_solid_rect(ZIndex(5), r(x), ink());
        }
        let xs: Vec<f32> = list
            .iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Rect(c) => c.rect.origin.x,
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn clear_restarts_the_sequence() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(0), r(0.0), ink());
        list.push_solid_rect(ZIndex(0), r(1.0), ink());
        list.clear();
        assert!(list.items().is_empty());

        list.push_solid_rect(ZIndex(0), r(2.0), ink());
        assert_eq!(list.items()[0].key.order, 0);
    }

    #[test]
    fn pushes_after_iteration_are_picked_up() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(1), r(0.0), ink());
        assert_eq!(layers(&mut list), vec![1]);

        list.push_solid_rect(ZIndex(0), r(0.0), ink());
        assert_eq!(layers(&mut list), vec![0, 1]);
    }
}
