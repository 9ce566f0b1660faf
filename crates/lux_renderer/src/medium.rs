//! Stack of media a ray is currently travelling through.

use crate::{hittable::ShapeId, material::IOR_AIR};

/// One medium entered by the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Medium {
    pub refract_index: f32,
    /// Shape whose volume this is; `None` for the ambient medium.
    pub shape: Option<ShapeId>,
}

/// Ordered list of media, innermost last.
///
/// The ambient medium at the bottom is never removed, so the stack is never
/// empty. Each branch of the evaluator works on its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct RefractionStack {
    media: Vec<Medium>,
}

impl Default for RefractionStack {
    fn default() -> Self {
        Self::new(IOR_AIR)
    }
}

impl RefractionStack {
    /// Stack holding only the ambient medium.
    pub fn new(ambient_index: f32) -> Self {
        Self {
            media: vec![Medium {
                refract_index: ambient_index,
                shape: None,
            }],
        }
    }

    /// Refractive index of the innermost medium.
    pub fn current_index(&self) -> f32 {
        self.media
            .last()
            .map_or(IOR_AIR, |medium| medium.refract_index)
    }

    pub fn enter(&mut self, refract_index: f32, shape: ShapeId) {
        self.media.push(Medium {
            refract_index,
            shape: Some(shape),
        });
    }

    /// Remove the innermost entry for `shape`. Returns false if the ray was
    /// not inside it (the stack is then unchanged).
    pub fn exit(&mut self, shape: ShapeId) -> bool {
        let found = self
            .media
            .iter()
            .rposition(|medium| medium.shape == Some(shape));
        match found {
            Some(index) => {
                self.media.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, shape: ShapeId) -> bool {
        self.media.iter().any(|medium| medium.shape == Some(shape))
    }

    /// Number of entries, including the ambient medium.
    pub fn depth(&self) -> usize {
        self.media.len()
    }

    pub fn media(&self) -> &[Medium] {
        &self.media
    }

    /// Cross the boundary of `shape` on a copy of the stack.
    ///
    /// Returns the new stack and the indices on either side of the boundary
    /// `(n1, n2)`.
    pub fn cross(&self, shape: ShapeId, refract_index: f32, entering: bool) -> (Self, f32, f32) {
        let n1 = self.current_index();
        let mut next = self.clone();
        if entering {
            next.enter(refract_index, shape);
        } else {
            next.exit(shape);
        }
        let n2 = next.current_index();
        (next, n1, n2)
    }
}
