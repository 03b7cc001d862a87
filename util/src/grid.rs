use glam::{ivec2, IVec2};

/// Dense rectangular 2D array addressed by integer vectors.
///
/// Storage is row-major. The dimensions never change after construction, so
/// cells can be mutated in place but never added or removed.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Grid<T> {
    /// Width and height of the grid, never changes after construction.
    size: IVec2,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid where every cell is a copy of `value`.
    ///
    /// Panics if either dimension is negative.
    pub fn new(size: impl Into<IVec2>, value: T) -> Self {
        let size = size.into();
        assert!(size.x >= 0 && size.y >= 0, "negative grid size");
        Grid {
            size,
            cells: vec![value; size.x as usize * size.y as usize],
        }
    }
}

impl<T> Grid<T> {
    /// Create a grid by calling `f` on every position in row-major order.
    pub fn from_fn(
        size: impl Into<IVec2>,
        mut f: impl FnMut(IVec2) -> T,
    ) -> Self {
        let size = size.into();
        assert!(size.x >= 0 && size.y >= 0, "negative grid size");
        let cells = (0..size.y)
            .flat_map(|y| (0..size.x).map(move |x| ivec2(x, y)))
            .map(&mut f)
            .collect();
        Grid { size, cells }
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn contains(&self, pos: impl Into<IVec2>) -> bool {
        let pos = pos.into();
        pos.x >= 0 && pos.y >= 0 && pos.x < self.size.x && pos.y < self.size.y
    }

    fn idx(&self, pos: IVec2) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.size.x as usize + pos.x as usize)
    }

    pub fn get(&self, pos: impl Into<IVec2>) -> Option<&T> {
        self.idx(pos.into()).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: impl Into<IVec2>) -> Option<&mut T> {
        self.idx(pos.into()).map(|i| &mut self.cells[i])
    }

    /// Set the value at position. Writes outside the grid are ignored.
    ///
    /// Returns whether the position was inside the grid.
    pub fn set(&mut self, pos: impl Into<IVec2>, value: T) -> bool {
        if let Some(c) = self.get_mut(pos) {
            *c = value;
            true
        } else {
            false
        }
    }

    /// Iterate all positions of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = IVec2> + 'static {
        let size = self.size;
        (0..size.y).flat_map(move |y| (0..size.x).map(move |x| ivec2(x, y)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &T)> + '_ {
        self.positions().zip(self.cells.iter())
    }

    /// Map the grid contents into a new grid of the same size.
    pub fn map<U>(&self, mut f: impl FnMut(IVec2, &T) -> U) -> Grid<U> {
        Grid {
            size: self.size,
            cells: self.iter().map(|(p, c)| f(p, c)).collect(),
        }
    }
}

impl<T> std::ops::Index<IVec2> for Grid<T> {
    type Output = T;

    fn index(&self, pos: IVec2) -> &T {
        self.get(pos).expect("Grid: index out of bounds")
    }
}

impl<T> std::ops::IndexMut<IVec2> for Grid<T> {
    fn index_mut(&mut self, pos: IVec2) -> &mut T {
        self.get_mut(pos).expect("Grid: index out of bounds")
    }
}
