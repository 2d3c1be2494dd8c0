//! Test containers and flattening.
//!
//! A module produces its tests as a tree: a [`TestSuite`] holds [`TestNode`]s,
//! and every node is either a leaf [`Test`] or another suite. Before filtering,
//! the tree is flattened into a plain sequence of leaves, depth first and in
//! the order the nodes were added.
//!
//! Flattening never de-duplicates. A test that appears twice in the tree is
//! yielded twice.

use std::{iter::FusedIterator, panic::RefUnwindSafe, slice, vec};

use crate::test::{Test, TestResult};

/// One node of a test tree.
#[derive(Debug)]
pub enum TestNode {
    Case(Test),
    Suite(TestSuite),
}

impl From<Test> for TestNode {
    fn from(value: Test) -> Self {
        Self::Case(value)
    }
}

impl From<TestSuite> for TestNode {
    fn from(value: TestSuite) -> Self {
        Self::Suite(value)
    }
}

/// An ordered collection of test cases and nested suites.
#[derive(Debug, Default)]
pub struct TestSuite {
    nodes: Vec<TestNode>,
}

impl TestSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: impl Into<TestNode>) {
        self.nodes.push(node.into());
    }

    pub fn with(mut self, node: impl Into<TestNode>) -> Self {
        self.push(node);
        self
    }

    /// Direct children of this suite.
    pub fn nodes(&self) -> &[TestNode] {
        &self.nodes
    }

    /// Whether this suite has no direct children.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaf tests in the whole tree.
    pub fn count_tests(&self) -> usize {
        self.flatten().count()
    }

    /// Lazily iterate over all leaf tests, depth first.
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten {
            stack: vec![self.nodes.iter()],
        }
    }

    /// Like [`flatten`](Self::flatten), but hands out owned tests.
    pub fn into_flat(self) -> IntoFlatten {
        IntoFlatten {
            stack: vec![self.nodes.into_iter()],
        }
    }
}

impl FromIterator<TestNode> for TestSuite {
    fn from_iter<I: IntoIterator<Item = TestNode>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl Extend<TestNode> for TestSuite {
    fn extend<I: IntoIterator<Item = TestNode>>(&mut self, iter: I) {
        self.nodes.extend(iter);
    }
}

#[derive(Debug)]
pub struct Flatten<'s> {
    stack: Vec<slice::Iter<'s, TestNode>>,
}

impl<'s> Iterator for Flatten<'s> {
    type Item = &'s Test;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(iter) = self.stack.last_mut() {
            match iter.next() {
                Some(TestNode::Case(test)) => return Some(test),
                Some(TestNode::Suite(suite)) => self.stack.push(suite.nodes.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

impl FusedIterator for Flatten<'_> {}

#[derive(Debug)]
pub struct IntoFlatten {
    stack: Vec<vec::IntoIter<TestNode>>,
}

impl Iterator for IntoFlatten {
    type Item = Test;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(iter) = self.stack.last_mut() {
            match iter.next() {
                Some(TestNode::Case(test)) => return Some(test),
                Some(TestNode::Suite(suite)) => self.stack.push(suite.nodes.into_iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

impl FusedIterator for IntoFlatten {}

/// Builds the test tree of one module.
///
/// Every registered module gets a fresh collector scoped to its dotted name.
/// Tests added here get identifiers qualified by that scope, and
/// [`group`](Self::group) opens a nested suite one segment deeper.
#[derive(Debug)]
pub struct Collector {
    scope: String,
    suite: TestSuite,
}

impl Collector {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            suite: TestSuite::new(),
        }
    }

    /// The dotted scope new tests are qualified with.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn qualify(&self, name: &str) -> String {
        match self.scope.is_empty() {
            true => name.to_string(),
            false => format!("{}.{name}", self.scope),
        }
    }

    /// Add a test case named `name` to the current scope.
    pub fn test<F, T>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>,
    {
        let id = self.qualify(name);
        self.suite.push(Test::from_fn(id, f));
        self
    }

    /// Add a nested suite named `name`, populated by `build`.
    pub fn group(&mut self, name: &str, build: impl FnOnce(&mut Collector)) -> &mut Self {
        let mut nested = Collector::new(self.qualify(name));
        build(&mut nested);
        self.suite.push(nested.into_suite());
        self
    }

    pub fn into_suite(self) -> TestSuite {
        self.suite
    }
}
