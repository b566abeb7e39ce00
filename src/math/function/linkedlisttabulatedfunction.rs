use std::cell::Cell;

use tracing::{
    debug,
    trace
};

use crate::math::function::functionpoint::FunctionPoint;
use crate::math::function::tabulatedfunction::{
    brackets,
    check_abscissa,
    check_finite,
    check_index,
    interpolate,
    is_out_of_domain,
    validate_domain,
    StorageType,
    TabulatedFunction,
    EPSILON
};
use crate::math::function::tabulatedfunctionerror::{
    Result,
    TabulatedFunctionError
};

// ─────────────────────────────────────────────
// Node arena
// ─────────────────────────────────────────────
//
// 環狀雙向串列以 slab 實作：`nodes[HEAD]` 為哨兵節點，不存放資料，
// `nodes[HEAD].next` 為第一個點，`nodes[HEAD].prev` 為最後一個點。
// prev / next 為索引（handle），不持有所有權；刪除的槽位放入 free list 重複使用。

const HEAD: usize = 0;

#[derive(Clone, Debug)]
struct FunctionNode {
    point: FunctionPoint,
    prev: usize,
    next: usize
}

impl FunctionNode {
    fn unlinked(handle: usize, point: FunctionPoint) -> FunctionNode {
        FunctionNode { point, prev: handle, next: handle }
    }
}

/// Most recently resolved index → node mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AccessCache {
    index: usize,
    node: usize
}

/// Tabulated function stored as a circular doubly-linked list with a sentinel
/// node and a single-entry locality cache.
///
/// Index lookups walk from whichever end is closer, unless the index is the
/// one resolved last, which is answered directly. `value_at` resumes its scan
/// from the cached node when that node lies at or before the queried x, so
/// sweeps over increasing x stay cheap.
///
/// The cache sits in a [`Cell`], so shared lookups can refresh it; the type is
/// not `Sync`.
#[derive(Clone, Debug)]
pub struct LinkedListTabulatedFunction {
    nodes: Vec<FunctionNode>,
    free: Vec<usize>,
    size: usize,
    last_accessed: Cell<Option<AccessCache>>
}

impl LinkedListTabulatedFunction {
    pub fn new(left_x: f64, right_x: f64, points_count: usize) -> Result<LinkedListTabulatedFunction> {
        let step = validate_domain(left_x, right_x, points_count)?;
        let mut function = Self::empty(points_count);
        for i in 0..points_count {
            function.add_node_to_tail(FunctionPoint::new(left_x + i as f64 * step, 0.0));
        }
        function.log_constructed();
        Ok(function)
    }

    pub fn with_values(left_x: f64, right_x: f64, values: &[f64]) -> Result<LinkedListTabulatedFunction> {
        let step = validate_domain(left_x, right_x, values.len())?;
        let mut function = Self::empty(values.len());
        for (i, &y) in values.iter().enumerate() {
            function.add_node_to_tail(FunctionPoint::new(left_x + i as f64 * step, y));
        }
        function.log_constructed();
        Ok(function)
    }

    fn empty(capacity: usize) -> LinkedListTabulatedFunction {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(FunctionNode::unlinked(HEAD, FunctionPoint::new(f64::NAN, f64::NAN)));
        LinkedListTabulatedFunction {
            nodes,
            free: Vec::new(),
            size: 0,
            last_accessed: Cell::new(None)
        }
    }

    fn log_constructed(&self) {
        debug!(
            size = self.size,
            left = self.left_border(),
            right = self.right_border(),
            "linked list tabulated function constructed"
        );
    }

    fn first(&self) -> usize {
        self.nodes[HEAD].next
    }

    fn last(&self) -> usize {
        self.nodes[HEAD].prev
    }

    fn invalidate_cache(&self) {
        self.last_accessed.set(None);
    }

    fn node_by_index(&self, index: usize) -> usize {
        if let Some(cache) = self.last_accessed.get() {
            if cache.index == index {
                trace!(index, "locality cache hit");
                return cache.node;
            }
        }

        let node = if index < self.size / 2 {
            (0..index).fold(self.first(), |current, _| self.nodes[current].next)
        } else {
            (index + 1..self.size).fold(self.last(), |current, _| self.nodes[current].prev)
        };
        trace!(index, "locality cache miss");
        self.last_accessed.set(Some(AccessCache { index, node }));
        node
    }

    fn allocate(&mut self, point: FunctionPoint) -> usize {
        match self.free.pop() {
            Some(handle) => {
                self.nodes[handle] = FunctionNode::unlinked(handle, point);
                handle
            },
            None => {
                let handle = self.nodes.len();
                self.nodes.push(FunctionNode::unlinked(handle, point));
                handle
            }
        }
    }

    /// Splices a new node in front of `next`; `next == HEAD` appends.
    fn insert_before(&mut self, next: usize, point: FunctionPoint) -> usize {
        let node = self.allocate(point);
        let prev = self.nodes[next].prev;

        self.nodes[node].prev = prev;
        self.nodes[node].next = next;
        self.nodes[prev].next = node;
        self.nodes[next].prev = node;

        self.size += 1;
        self.invalidate_cache();
        node
    }

    fn add_node_to_tail(&mut self, point: FunctionPoint) -> usize {
        self.insert_before(HEAD, point)
    }

    fn delete_node_by_index(&mut self, index: usize) -> FunctionPoint {
        let node = self.node_by_index(index);
        let FunctionNode { point, prev, next } = self.nodes[node].clone();

        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[node].prev = node;
        self.nodes[node].next = node;
        self.free.push(node);

        self.size -= 1;
        self.invalidate_cache();
        point
    }

    fn check_neighbours(&self, node: usize, x: f64) -> Result<()> {
        let FunctionNode { prev, next, .. } = self.nodes[node];
        let previous = (prev != HEAD).then(|| self.nodes[prev].point.x());
        let next = (next != HEAD).then(|| self.nodes[next].point.x());
        check_abscissa(x, previous, next)
    }

    /// First node whose x exceeds `x` (the sentinel when none does).
    fn insertion_neighbour(&self, x: f64) -> Result<(usize, usize)> {
        check_finite(x)?;
        let mut current = self.first();
        let mut pos = 0;
        while current != HEAD {
            let current_x = self.nodes[current].point.x();
            if (current_x - x).abs() < EPSILON {
                return Err(TabulatedFunctionError::DuplicateAbscissa { x });
            }
            if current_x > x {
                break;
            }
            current = self.nodes[current].next;
            pos += 1;
        }
        Ok((pos, current))
    }
}

impl TabulatedFunction for LinkedListTabulatedFunction {
    fn storage_type(&self) -> StorageType {
        StorageType::LinkedList
    }

    fn left_border(&self) -> f64 {
        self.nodes[self.first()].point.x()
    }

    fn right_border(&self) -> f64 {
        self.nodes[self.last()].point.x()
    }

    fn points_count(&self) -> usize {
        self.size
    }

    fn value_at(&self, x: f64) -> f64 {
        if is_out_of_domain(x, self.left_border(), self.right_border()) {
            return f64::NAN;
        }

        // The last node opens no segment; resume one node earlier.
        let (mut current, mut index) = match self.last_accessed.get() {
            Some(cache) if self.nodes[cache.node].point.x() <= x => {
                if self.nodes[cache.node].next == HEAD {
                    (self.nodes[cache.node].prev, cache.index - 1)
                } else {
                    (cache.node, cache.index)
                }
            },
            _ => (self.first(), 0)
        };

        while self.nodes[current].next != HEAD {
            let next = self.nodes[current].next;
            let lhs_pt = &self.nodes[current].point;
            let rhs_pt = &self.nodes[next].point;
            if brackets(lhs_pt, rhs_pt, x) {
                self.last_accessed.set(Some(AccessCache { index, node: current }));
                return interpolate(lhs_pt, rhs_pt, x);
            }
            current = next;
            index += 1;
        }
        f64::NAN
    }

    fn point(&self, index: usize) -> Result<FunctionPoint> {
        check_index(index, self.size)?;
        Ok(self.nodes[self.node_by_index(index)].point)
    }

    fn point_x(&self, index: usize) -> Result<f64> {
        check_index(index, self.size)?;
        Ok(self.nodes[self.node_by_index(index)].point.x())
    }

    fn point_y(&self, index: usize) -> Result<f64> {
        check_index(index, self.size)?;
        Ok(self.nodes[self.node_by_index(index)].point.y())
    }

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<()> {
        check_index(index, self.size)?;
        let node = self.node_by_index(index);
        self.check_neighbours(node, point.x())?;
        self.nodes[node].point = point;
        Ok(())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<()> {
        check_index(index, self.size)?;
        let node = self.node_by_index(index);
        self.check_neighbours(node, x)?;
        self.nodes[node].point.set_x(x);
        Ok(())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<()> {
        check_index(index, self.size)?;
        let node = self.node_by_index(index);
        self.nodes[node].point.set_y(y);
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<()> {
        if self.size <= 2 {
            return Err(TabulatedFunctionError::TooFewPointsToDelete { size: self.size });
        }
        check_index(index, self.size)?;

        let point = self.delete_node_by_index(index);
        debug!(index, x = point.x(), size = self.size, "point deleted");
        Ok(())
    }

    fn add_point(&mut self, point: FunctionPoint) -> Result<()> {
        let (pos, next) = self.insertion_neighbour(point.x())?;
        self.insert_before(next, point);
        debug!(pos, size = self.size, "point added");
        Ok(())
    }

    fn points(&self) -> Vec<FunctionPoint> {
        let mut points = Vec::with_capacity(self.size);
        let mut current = self.first();
        while current != HEAD {
            points.push(self.nodes[current].point);
            current = self.nodes[current].next;
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn sample() -> LinkedListTabulatedFunction {
        LinkedListTabulatedFunction::with_values(0.0, 4.0, &[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap()
    }

    fn assert_links_consistent(f: &LinkedListTabulatedFunction) {
        let mut current = HEAD;
        for _ in 0..=f.size {
            let next = f.nodes[current].next;
            assert_eq!(f.nodes[next].prev, current);
            current = next;
        }
        assert_eq!(current, HEAD, "chain must close on the sentinel after size + 1 hops");
    }

    #[test]
    fn lookup_fills_cache_and_mutation_clears_it() {
        let mut f = sample();
        assert_eq!(f.last_accessed.get(), None);

        assert_relative_eq!(f.point_y(3).unwrap(), 40.0);
        let cached = f.last_accessed.get().unwrap();
        assert_eq!(cached.index, 3);
        assert_eq!(f.node_by_index(3), cached.node);

        f.add_point(FunctionPoint::new(3.5, 45.0)).unwrap();
        assert_eq!(f.last_accessed.get(), None);
        assert_relative_eq!(f.point_y(3).unwrap(), 40.0);
        assert_relative_eq!(f.point_y(4).unwrap(), 45.0);

        f.delete_point(0).unwrap();
        assert_eq!(f.last_accessed.get(), None);
        assert_links_consistent(&f);
    }

    #[test]
    fn traversal_from_either_end_agrees() {
        let f = LinkedListTabulatedFunction::new(0.0, 9.0, 10).unwrap();
        for i in (0..10).rev() {
            f.invalidate_cache();
            assert_relative_eq!(f.point_x(i).unwrap(), i as f64);
        }
    }

    #[test]
    fn value_at_does_not_trust_a_cache_right_of_x() {
        let f = sample();
        assert_relative_eq!(f.value_at(3.5), 45.0);
        assert_eq!(f.last_accessed.get().map(|c| c.index), Some(3));
        assert_relative_eq!(f.value_at(0.5), 15.0);
        assert_relative_eq!(f.value_at(4.0), 50.0);
        assert_relative_eq!(f.point_x(3).unwrap(), 3.0);
    }

    #[test]
    fn value_at_right_border_after_tail_lookup() {
        let f = sample();
        assert_relative_eq!(f.point_x(4).unwrap(), 4.0);
        assert_eq!(f.last_accessed.get().map(|c| c.index), Some(4));
        assert_relative_eq!(f.value_at(f.right_border()), 50.0);
        assert_eq!(f.last_accessed.get().map(|c| c.index), Some(3));
    }

    #[test]
    fn deleted_node_is_unlinked_and_its_slot_reused() {
        let mut f = sample();
        let node = f.node_by_index(2);
        f.delete_point(2).unwrap();
        assert_eq!(f.nodes[node].prev, node);
        assert_eq!(f.nodes[node].next, node);
        assert_eq!(f.free, vec![node]);

        let slots = f.nodes.len();
        f.add_point(FunctionPoint::new(2.5, 0.0)).unwrap();
        assert_eq!(f.nodes.len(), slots);
        assert!(f.free.is_empty());
        assert_links_consistent(&f);
        assert_relative_eq!(f.point_x(2).unwrap(), 2.5);
    }

    #[test]
    fn prepend_and_append_move_the_sentinel_links() {
        let mut f = sample();
        f.add_point(FunctionPoint::new(-1.0, 0.0)).unwrap();
        f.add_point(FunctionPoint::new(5.0, 60.0)).unwrap();
        assert_eq!(f.nodes[f.first()].point, FunctionPoint::new(-1.0, 0.0));
        assert_eq!(f.nodes[f.last()].point, FunctionPoint::new(5.0, 60.0));
        assert_eq!(f.points_count(), 7);
        assert_links_consistent(&f);
    }
}
