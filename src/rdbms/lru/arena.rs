use std::ops::{Index, IndexMut};

use crate::buffer::entity::ControlBlock;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SlotId(usize);

#[derive(Debug)]
pub struct Node {
    pub block: ControlBlock,
    // 同じバケットの次のノード
    pub bucket_next: Option<SlotId>,
    // LRU リスト上でより新しい側
    pub newer: Option<SlotId>,
    // LRU リスト上でより古い側
    pub older: Option<SlotId>,
}

impl Node {
    fn new(block: ControlBlock) -> Self {
        Self {
            block,
            bucket_next: None,
            newer: None,
            older: None,
        }
    }
}

// 空いたスロットは再利用する
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Option<Node>>,
    free: Vec<SlotId>,
}

impl Arena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: vec![],
        }
    }

    pub fn insert(&mut self, block: ControlBlock) -> SlotId {
        let node = Some(Node::new(block));
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot.0] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                SlotId(self.nodes.len() - 1)
            }
        }
    }

    pub fn remove(&mut self, slot: SlotId) -> Option<ControlBlock> {
        let node = self.nodes.get_mut(slot.0)?.take()?;
        self.free.push(slot);
        Some(node.block)
    }

    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node.as_ref().map(|node| (SlotId(i), node)))
    }
}

impl Index<SlotId> for Arena {
    type Output = Node;
    fn index(&self, slot: SlotId) -> &Self::Output {
        self.nodes[slot.0].as_ref().expect("vacant arena slot")
    }
}

impl IndexMut<SlotId> for Arena {
    fn index_mut(&mut self, slot: SlotId) -> &mut Self::Output {
        self.nodes[slot.0].as_mut().expect("vacant arena slot")
    }
}
