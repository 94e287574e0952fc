//! Route trie nodes.

use crate::parser::Method;
use crate::router::segment::StringSegment;

/// Path separator for both patterns and request paths.
pub(crate) const SEPARATOR: char = '/';

/// How a route pattern segment matches request segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Matches one identical segment.
    Literal,
    /// `:name`, captures one segment.
    Parameter,
    /// `:name*`, captures the rest of the path.
    LongParameter,
}

impl SegmentKind {
    /// Classify a pattern segment and return it with the text the node stores:
    /// the literal itself, or the parameter name.
    ///
    /// ```
    /// use playerweb::router::SegmentKind;
    ///
    /// assert_eq!(SegmentKind::classify("items"), (SegmentKind::Literal, "items"));
    /// assert_eq!(SegmentKind::classify(":id"), (SegmentKind::Parameter, "id"));
    /// assert_eq!(SegmentKind::classify(":path*"), (SegmentKind::LongParameter, "path"));
    /// assert_eq!(SegmentKind::classify(":"), (SegmentKind::Literal, ":"));
    /// ```
    pub fn classify(segment: &str) -> (SegmentKind, &str) {
        match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => match name.strip_suffix('*') {
                Some(long_name) => (SegmentKind::LongParameter, long_name),
                None => (SegmentKind::Parameter, name),
            },
            _ => (SegmentKind::Literal, segment),
        }
    }
}

/// One segment position in the route trie.
pub(crate) struct Node<F> {
    kind: SegmentKind,
    value: String,
    handlers: [Option<F>; Method::COUNT],
    children: Vec<Node<F>>,
    has_routes: bool,
}

impl<F> Node<F> {
    pub(crate) fn root() -> Self {
        Self::new(SegmentKind::Literal, "")
    }

    fn new(kind: SegmentKind, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            handlers: std::array::from_fn(|_| None),
            children: Vec::new(),
            has_routes: false,
        }
    }

    pub(crate) fn has_routes(&self) -> bool {
        self.has_routes
    }

    /// Return the child for `(kind, value)`, appending a new one if there is none.
    pub(crate) fn child_or_insert(&mut self, kind: SegmentKind, value: &str) -> &mut Node<F> {
        let pos = match self
            .children
            .iter()
            .position(|child| child.kind == kind && child.value == value)
        {
            Some(pos) => pos,
            None => {
                self.children.push(Node::new(kind, value));
                self.children.len() - 1
            }
        };

        &mut self.children[pos]
    }

    /// Store `factory` in the slot for `method`, returning the factory it replaced.
    pub(crate) fn set_handler(&mut self, method: Method, factory: F) -> Option<F> {
        self.has_routes = true;
        self.handlers[method.index()].replace(factory)
    }

    pub(crate) fn handler(&self, method: Method) -> Option<&F> {
        self.handlers[method.index()].as_ref()
    }

    pub(crate) fn allowed_methods(&self) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|method| self.handlers[method.index()].is_some())
            .collect()
    }

    /// Depth-first match of `path` against this node's subtree.
    ///
    /// Children are tried in insertion order. A parameter binding is pushed
    /// before descending and popped again if the descent fails, so on `None`
    /// `params` is left exactly as it was passed in.
    pub(crate) fn match_path<'n, 'p>(
        &'n self,
        path: StringSegment<'p>,
        params: &mut Vec<(&'n str, &'p str)>,
    ) -> Option<&'n Node<F>> {
        let mut rest = path;
        let token = match rest.next_token(SEPARATOR) {
            Some(token) => token,
            None => return Some(self),
        };

        for child in &self.children {
            match child.kind {
                SegmentKind::Literal => {
                    if !token.is_empty() && token == child.value.as_str() {
                        if let Some(found) = child.match_path(rest, params) {
                            return Some(found);
                        }
                    }
                }
                SegmentKind::Parameter => {
                    if token.is_empty() {
                        continue;
                    }
                    params.push((child.value.as_str(), token.as_str()));
                    if let Some(found) = child.match_path(rest, params) {
                        return Some(found);
                    }
                    params.pop();
                }
                SegmentKind::LongParameter => {
                    params.push((child.value.as_str(), path.as_str()));
                    return Some(child);
                }
            }
        }

        None
    }

    /// Append `(method, pattern)` for every handler in this subtree.
    pub(crate) fn collect_routes(&self, prefix: &str, out: &mut Vec<(Method, String)>) {
        let pattern = match self.kind {
            _ if self.value.is_empty() => prefix.to_string(),
            SegmentKind::Literal => format!("{prefix}/{}", self.value),
            SegmentKind::Parameter => format!("{prefix}/:{}", self.value),
            SegmentKind::LongParameter => format!("{prefix}/:{}*", self.value),
        };

        for method in self.allowed_methods() {
            let shown = if pattern.is_empty() { "/".to_string() } else { pattern.clone() };
            out.push((method, shown));
        }

        for child in &self.children {
            child.collect_routes(&pattern, out);
        }
    }
}
