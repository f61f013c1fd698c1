use super::arena::{Arena, SlotId};

// head が最も新しく, tail が最も古い
#[derive(Debug, Default)]
pub struct LruList {
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl LruList {
    pub fn head(&self) -> Option<SlotId> {
        self.head
    }

    pub fn tail(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn push_front(&mut self, arena: &mut Arena, slot: SlotId) {
        arena[slot].newer = None;
        arena[slot].older = self.head;
        match self.head {
            Some(head) => arena[head].newer = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    pub fn push_back(&mut self, arena: &mut Arena, slot: SlotId) {
        arena[slot].older = None;
        arena[slot].newer = self.tail;
        match self.tail {
            Some(tail) => arena[tail].older = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
    }

    // anchor のすぐ新しい側につなぐ
    pub fn insert_newer_than(&mut self, arena: &mut Arena, anchor: SlotId, slot: SlotId) {
        let newer = arena[anchor].newer;
        arena[slot].older = Some(anchor);
        arena[slot].newer = newer;
        match newer {
            Some(newer) => arena[newer].older = Some(slot),
            None => self.head = Some(slot),
        }
        arena[anchor].newer = Some(slot);
    }

    pub fn unlink(&mut self, arena: &mut Arena, slot: SlotId) {
        let newer = arena[slot].newer;
        let older = arena[slot].older;
        match newer {
            Some(newer) => arena[newer].older = older,
            None => self.head = older,
        }
        match older {
            Some(older) => arena[older].newer = newer,
            None => self.tail = newer,
        }
        arena[slot].newer = None;
        arena[slot].older = None;
    }

    pub fn move_to_front(&mut self, arena: &mut Arena, slot: SlotId) {
        if self.head == Some(slot) {
            return;
        }
        self.unlink(arena, slot);
        self.push_front(arena, slot);
    }

    // 古い順にたどる
    pub fn iter_from_tail<'a>(&self, arena: &'a Arena) -> impl Iterator<Item = SlotId> + 'a {
        let mut cursor = self.tail;
        std::iter::from_fn(move || {
            let slot = cursor?;
            cursor = arena[slot].newer;
            Some(slot)
        })
    }
}
