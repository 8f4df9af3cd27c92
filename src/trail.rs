/// The last `N` positions of an entity, used to stroke a short tail.
#[derive(Clone, Debug)]
pub struct Trail<const N: usize> {
    points: [(f32, f32); N],
    // Slot holding the oldest point; overwritten by the next push.
    head: usize,
}

impl<const N: usize> Trail<N> {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            points: [(x, y); N],
            head: 0,
        }
    }

    /// Drops the oldest position and records `(x, y)` as the newest.
    pub fn push(&mut self, x: f32, y: f32) {
        self.points[self.head] = (x, y);
        self.head = (self.head + 1) % N;
    }

    pub fn oldest(&self) -> (f32, f32) {
        self.points[self.head]
    }
}
