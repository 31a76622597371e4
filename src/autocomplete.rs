//! Prefix completion backed by a ternary search tree.
//!
//! Each node holds one char and three children: `less` and `greater` lead to
//! siblings that sort before or after it, `equal` leads to the next char of
//! every word sharing the path so far.

use std::cmp::Ordering;

type Link = Option<Box<Node>>;

#[derive(Debug, Clone)]
struct Node {
    data: char,
    is_word: bool,
    less: Link,
    equal: Link,
    greater: Link,
}

impl Node {
    fn new(data: char) -> Self {
        Self {
            data,
            is_word: false,
            less: None,
            equal: None,
            greater: None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.less.is_none() && self.equal.is_none() && self.greater.is_none()
    }

    /// Next node of an unbranching chain: only `equal` is set.
    fn single_child(&self) -> bool {
        self.equal.is_some() && self.less.is_none() && self.greater.is_none()
    }
}

/// A set of words supporting prefix suggestions.
///
/// Cloning copies the whole tree; two indexes never share nodes.
#[derive(Debug, Clone, Default)]
pub struct AutoComplete {
    root: Link,
    size: usize,
    count: usize,
}

impl AutoComplete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct words stored.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Adds `word`. Inserting a word twice keeps a single copy.
    pub fn insert(&mut self, word: &str) {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return;
        }
        if insert_at(&mut self.root, &chars, &mut self.size) {
            self.count += 1;
        }
    }

    pub fn search(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        self.find(&chars).is_some_and(|node| node.is_word)
    }

    /// Removes `word` and frees the nodes no other word needs.
    ///
    /// Returns false if the word was not stored.
    pub fn remove(&mut self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return false;
        }
        let removed = remove_at(&mut self.root, &chars, &mut self.size);
        if removed {
            self.count -= 1;
        }
        removed
    }

    /// Every stored word that extends `prefix`.
    ///
    /// Empty when the prefix is unknown or already a complete word.
    pub fn suggestions(&self, prefix: &str) -> Vec<String> {
        let chars: Vec<char> = prefix.chars().collect();
        let mut options = Vec::new();
        match self.find(&chars) {
            Some(node) if !node.is_word => {
                let mut buffer = prefix.to_string();
                collect(node.equal.as_deref(), &mut buffer, &mut options);
            }
            _ => {}
        }
        options
    }

    /// Like [`suggestions`](Self::suggestions), and also extends `prefix` in
    /// place along the chars every suggestion shares.
    pub fn suggestions_partial(&self, prefix: &mut String) -> Vec<String> {
        let chars: Vec<char> = prefix.chars().collect();
        let Some(node) = self.find(&chars) else {
            return Vec::new();
        };
        let original = prefix.clone();

        let mut next = node.equal.as_deref();
        while let Some(candidate) = next {
            if !candidate.single_child() {
                break;
            }
            prefix.push(candidate.data);
            next = candidate.equal.as_deref();
        }

        let mut options = Vec::new();
        if !node.is_word {
            let mut buffer = original;
            collect(node.equal.as_deref(), &mut buffer, &mut options);
        }
        options
    }

    /// Owned variant of [`suggestions_partial`](Self::suggestions_partial).
    pub fn complete(&self, prefix: &str) -> (String, Vec<String>) {
        let mut completed = prefix.to_string();
        let options = self.suggestions_partial(&mut completed);
        (completed, options)
    }

    /// All stored words in sorted order.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.count);
        collect(self.root.as_deref(), &mut String::new(), &mut words);
        words
    }

    /// Node holding the last char of `word`, if the path exists.
    fn find(&self, word: &[char]) -> Option<&Node> {
        let last = word.len().checked_sub(1)?;
        let mut i = 0;
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            match word[i].cmp(&node.data) {
                Ordering::Less => link = node.less.as_deref(),
                Ordering::Greater => link = node.greater.as_deref(),
                Ordering::Equal if i == last => return Some(node),
                Ordering::Equal => {
                    i += 1;
                    link = node.equal.as_deref();
                }
            }
        }
        None
    }
}

/// Returns true if `word` was not stored before.
fn insert_at(link: &mut Link, word: &[char], size: &mut usize) -> bool {
    let node = link.get_or_insert_with(|| {
        *size += 1;
        Box::new(Node::new(word[0]))
    });

    match word[0].cmp(&node.data) {
        Ordering::Less => insert_at(&mut node.less, word, size),
        Ordering::Greater => insert_at(&mut node.greater, word, size),
        Ordering::Equal if word.len() == 1 => {
            let fresh = !node.is_word;
            node.is_word = true;
            fresh
        }
        Ordering::Equal => insert_at(&mut node.equal, &word[1..], size),
    }
}

/// Returns true if `word` was stored. Dead nodes on the way back up are dropped.
fn remove_at(link: &mut Link, word: &[char], size: &mut usize) -> bool {
    let Some(node) = link.as_deref_mut() else {
        return false;
    };

    let removed = match word[0].cmp(&node.data) {
        Ordering::Less => remove_at(&mut node.less, word, size),
        Ordering::Greater => remove_at(&mut node.greater, word, size),
        Ordering::Equal if word.len() == 1 => std::mem::replace(&mut node.is_word, false),
        Ordering::Equal => remove_at(&mut node.equal, &word[1..], size),
    };

    if removed && !node.is_word && node.is_leaf() {
        *link = None;
        *size -= 1;
    }
    removed
}

/// In-order walk appending every word below `node` to `out`.
fn collect(node: Option<&Node>, buffer: &mut String, out: &mut Vec<String>) {
    let Some(node) = node else {
        return;
    };

    collect(node.less.as_deref(), buffer, out);

    buffer.push(node.data);
    if node.is_word {
        out.push(buffer.clone());
    }
    collect(node.equal.as_deref(), buffer, out);
    buffer.pop();

    collect(node.greater.as_deref(), buffer, out);
}

impl<S: AsRef<str>> FromIterator<S> for AutoComplete {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tree = AutoComplete::new();
        tree.extend(iter);
        tree
    }
}

impl<S: AsRef<str>> Extend<S> for AutoComplete {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}
