use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step<'a> {
    Module(&'a str),
    Element(usize),
    Definition(&'a str),
}

/// The position inside the formula currently being evaluated.
///
/// A `Trail` lives on the stack of the evaluator: every recursive call receives its own extension
/// of the caller's trail, so nothing has to be restored when a call returns. It is only rendered
/// to a string when an error is reported.
///
/// # Example
/// ```
/// use attomodel::trail::Trail;
///
/// let root = Trail::root("set");
/// let body = root.child(1);
/// let def = body.definition("isSet");
/// let inner = def.child(0);
/// assert_eq!(inner.to_string(), "set/1/{isSet}/0");
/// assert_eq!(inner.depth(), 3);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Trail<'a> {
    parent: Option<&'a Trail<'a>>,
    step: Step<'a>,
    depth: usize,
}

impl<'a> Trail<'a> {
    pub fn root(module: &'a str) -> Self {
        Trail {
            parent: None,
            step: Step::Module(module),
            depth: 0,
        }
    }

    pub fn child(&'a self, index: usize) -> Trail<'a> {
        self.push(Step::Element(index))
    }

    /// Entering the body of a defined constant
    pub fn definition(&'a self, name: &'a str) -> Trail<'a> {
        self.push(Step::Definition(name))
    }

    fn push(&'a self, step: Step<'a>) -> Trail<'a> {
        Trail {
            parent: Some(self),
            step,
            depth: self.depth + 1,
        }
    }

    /// Number of steps below the root
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn step(&self) -> Step<'a> {
        self.step
    }

    /// The steps from the root down to this position
    pub fn steps(&self) -> Vec<Step<'a>> {
        let mut steps = Vec::with_capacity(self.depth + 1);
        let mut current = Some(self);
        while let Some(trail) = current {
            steps.push(trail.step);
            current = trail.parent;
        }
        steps.reverse();
        steps
    }
}

impl fmt::Display for Trail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps().into_iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match step {
                Step::Module(label) => f.write_str(label)?,
                Step::Element(index) => write!(f, "{}", index)?,
                Step::Definition(name) => write!(f, "{{{}}}", name)?,
            }
        }
        Ok(())
    }
}
