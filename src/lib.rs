//! # darts-rs
//!
//! Double-array trie (DAT) construction with exact-match lookup.
//!
//! A key set is sorted, expanded one depth level at a time into an
//! intermediate trie, and packed into two parallel `i32` arrays, `base` and
//! `check`. A transition from a state whose base is `b` on symbol `c` lands on
//! cell `t = b + c + 1` and is genuine iff `check[t] == b`. The arrays are
//! built once and queried many times.
//!
//! ## Example
//!
//! ```rust
//! use darts_rs::Builder;
//!
//! let darts = Builder::new().build_strs(["a", "an", "and"]).unwrap();
//!
//! assert!(darts.contains_str("an"));
//! assert!(darts.contains_str("and"));
//! assert!(!darts.contains_str("ant"));
//! assert!(!darts.contains_str(""));
//! ```

#![forbid(unsafe_code)]

mod error;

pub use error::{DartsError, Result};

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use log::{debug, trace};

// =============================================================================
// Configuration
// =============================================================================

/// Default growth step of the backing arrays, in cells.
pub const RESIZE_DELTA: usize = 64;
/// Occupancy ratio of a probe at or above which the scan hint skips ahead.
pub const DENSITY_THRESHOLD: f32 = 0.95;
/// Array index of the root state.
pub const ROOT_INDEX: usize = 0;
/// Base recorded on intermediate trie nodes that end a key.
pub const END_NODE_BASE: i32 = -1;

/// Array cells must be addressable by an `i32` base value.
const MAX_CELLS: usize = i32::MAX as usize + 1;
const ROOT_NODE: NodeId = 0;

/// Tuning knobs for [`Builder`].
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Cells allocated before packing starts.
    pub initial_capacity: usize,
    /// Arrays grow to the next multiple of this many cells.
    pub resize_delta: usize,
    /// Probe occupancy ratio that moves the scan hint to the accepted position.
    /// Affects build speed and array density, never lookup results.
    pub density_threshold: f32,
    /// Drop equal keys after sorting.
    pub dedup_keys: bool,
    /// Keep the intermediate trie in the result instead of reclaiming packed subtrees.
    pub retain_trie: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            initial_capacity: RESIZE_DELTA,
            resize_delta: RESIZE_DELTA,
            density_threshold: DENSITY_THRESHOLD,
            dedup_keys: false,
            retain_trie: false,
        }
    }
}

// =============================================================================
// Symbols
// =============================================================================

/// Anything usable as a key symbol: `u8`, `u16`, `u32`, `char`, ...
///
/// The transition alphabet is `symbol + 1`; encoded `0` is the end-of-key
/// transition.
pub trait Symbol: Copy + Ord + fmt::Debug + Into<u32> {}

impl<T: Copy + Ord + fmt::Debug + Into<u32>> Symbol for T {}

#[inline]
fn raw<S: Symbol>(symbol: &S) -> u32 {
    (*symbol).into()
}

#[inline]
fn encode<S: Symbol>(symbol: S) -> Result<u32> {
    let value: u32 = symbol.into();
    value
        .checked_add(1)
        .ok_or(DartsError::SymbolOverflow { symbol: value })
}

#[inline]
fn to_cell(value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| DartsError::allocation(value))
}

// =============================================================================
// Key ordering
// =============================================================================

/// Sorts keys by symbol code, a strict prefix before its extensions.
fn sort_keys<S: Symbol>(keys: &mut Vec<Vec<S>>, dedup: bool) -> Result<()> {
    if keys.is_empty() {
        return Err(DartsError::EmptyInput);
    }
    keys.sort_unstable_by(|a, b| a.iter().map(raw).cmp(b.iter().map(raw)));
    if dedup {
        keys.dedup();
    }
    Ok(())
}

// =============================================================================
// Intermediate trie
// =============================================================================

/// Index of a node in the [`Trie`] arena.
pub type NodeId = usize;

/// One state of the intermediate trie.
///
/// Children of a node are allocated together by a sibling fetch, so they
/// occupy a contiguous id range in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieNode {
    depth: usize,
    code: u32,
    left: usize,
    right: usize,
    index: Option<usize>,
    base: i32,
    children: Range<NodeId>,
}

impl TrieNode {
    fn new(depth: usize, code: u32, left: usize, right: usize) -> Self {
        Self {
            depth,
            code,
            left,
            right,
            index: None,
            base: 0,
            children: 0..0,
        }
    }

    /// Distance from the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Encoded symbol entering this node; `0` for an end-of-key node.
    #[inline]
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Half-open range of sorted keys passing through this node.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.left..self.right
    }

    /// Cell assigned in the double array, once packed.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Base value written for this node ([`END_NODE_BASE`] for terminals).
    #[inline]
    pub fn base(&self) -> i32 {
        self.base
    }

    /// Arena ids of this node's sibling group.
    #[inline]
    pub fn children(&self) -> Range<NodeId> {
        self.children.clone()
    }

    /// Whether this node is the end-of-key transition of its parent.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.depth > 0 && self.code == 0
    }
}

/// Arena-backed intermediate trie over a sorted key set.
#[derive(Debug, Clone)]
pub struct Trie<S> {
    nodes: Vec<TrieNode>,
    keys: Vec<Vec<S>>,
}

impl<S: Symbol> Trie<S> {
    fn new(keys: Vec<Vec<S>>) -> Self {
        let root = TrieNode::new(0, 0, 0, keys.len());
        Self {
            nodes: vec![root],
            keys,
        }
    }

    #[inline]
    pub fn root(&self) -> &TrieNode {
        &self.nodes[ROOT_NODE]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The sorted key set the trie was expanded from.
    pub fn keys(&self) -> &[Vec<S>] {
        &self.keys
    }

    /// Symbols from the root to `id`. For an end node this is the whole key.
    pub fn prefix(&self, id: NodeId) -> Option<&[S]> {
        let node = self.nodes.get(id)?;
        let len = if node.is_end() { node.depth - 1 } else { node.depth };
        let key = self.keys.get(node.left)?;
        key.get(..len)
    }

    /// Partitions the key range of `parent` into runs sharing the symbol at
    /// `parent.depth` and allocates one child per run.
    ///
    /// Returns the id range of the new sibling group, empty when every key in
    /// range has already been consumed.
    fn fetch(&mut self, parent: NodeId) -> Result<Range<NodeId>> {
        let (depth, left, right) = {
            let p = &self.nodes[parent];
            (p.depth, p.left, p.right)
        };
        let start = self.nodes.len();
        let mut prev: Option<u32> = None;

        for i in left..right {
            let key = &self.keys[i];
            if key.len() < depth {
                continue;
            }

            let cur = match key.get(depth) {
                Some(&symbol) => encode(symbol)?,
                None => 0,
            };

            if let Some(prev) = prev {
                if prev > cur {
                    return Err(DartsError::FetchOrder {
                        index: i,
                        depth,
                        prev,
                        cur,
                    });
                }
            }

            if prev != Some(cur) {
                // The run just closed ends here; the new one runs to `right`
                // until another symbol change closes it.
                if let Some(last) = self.nodes[start..].last_mut() {
                    last.right = i;
                }
                self.nodes.push(TrieNode::new(depth + 1, cur, i, right));
            }
            prev = Some(cur);
        }

        let children = start..self.nodes.len();
        self.nodes[parent].children = children.clone();
        Ok(children)
    }

    /// Drops a fully packed sibling group and everything allocated after it.
    fn reclaim(&mut self, parent: NodeId, first: NodeId) {
        debug_assert!(parent < first);
        self.nodes.truncate(first);
        self.nodes[parent].children = first..first;
    }
}

// =============================================================================
// Array storage
// =============================================================================

/// Growable `base`/`check`/`used` triple owned by the packer.
struct ArrayStorage {
    base: Vec<i32>,
    check: Vec<i32>,
    /// Cells already claimed as the base of some sibling group.
    used: Vec<bool>,
    delta: usize,
}

impl ArrayStorage {
    fn with_capacity(capacity: usize, delta: usize) -> Result<Self> {
        let mut storage = Self {
            base: Vec::new(),
            check: Vec::new(),
            used: Vec::new(),
            delta: delta.max(1),
        };
        storage.ensure(capacity.max(ROOT_INDEX + 1))?;
        Ok(storage)
    }

    #[inline]
    fn len(&self) -> usize {
        self.base.len()
    }

    /// Grows all three arrays to at least `min_len` cells, rounded up to the
    /// growth step. New cells are zero / unused.
    fn ensure(&mut self, min_len: usize) -> Result<()> {
        if min_len <= self.len() {
            return Ok(());
        }

        let new_len = min_len
            .checked_next_multiple_of(self.delta)
            .filter(|&len| len <= MAX_CELLS)
            .ok_or_else(|| DartsError::allocation(min_len))?;
        let extra = new_len - self.len();

        self.base
            .try_reserve_exact(extra)
            .map_err(|_| DartsError::allocation(new_len))?;
        self.check
            .try_reserve_exact(extra)
            .map_err(|_| DartsError::allocation(new_len))?;
        self.used
            .try_reserve_exact(extra)
            .map_err(|_| DartsError::allocation(new_len))?;

        self.base.resize(new_len, 0);
        self.check.resize(new_len, 0);
        self.used.resize(new_len, false);
        trace!("double array grown to {new_len} cells");
        Ok(())
    }

    fn into_array(self) -> DoubleArray {
        DoubleArray {
            base: self.base,
            check: self.check,
        }
    }
}

// =============================================================================
// Packer
// =============================================================================

/// Counters collected while packing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Keys in the sorted (and possibly deduplicated) input.
    pub keys: usize,
    /// Sibling groups placed.
    pub groups: usize,
    /// Candidate cells visited across all probes.
    pub probes: usize,
    /// Occupied states, root included.
    pub states: usize,
    /// Final array length.
    pub capacity: usize,
}

/// A placed sibling group whose members still need their children packed.
struct Frame {
    parent: NodeId,
    begin: usize,
    first: NodeId,
    pending: Range<NodeId>,
}

/// Exclusive build state: the trie being expanded, the arrays being packed,
/// and the output mapping. Consumed by [`BuildContext::run`].
struct BuildContext<S> {
    trie: Trie<S>,
    storage: ArrayStorage,
    next_check_pos: usize,
    density_threshold: f32,
    output: HashMap<usize, Vec<S>>,
    stats: BuildStats,
}

impl<S: Symbol> BuildContext<S> {
    fn new(keys: Vec<Vec<S>>, config: &BuildConfig) -> Result<Self> {
        let stats = BuildStats {
            keys: keys.len(),
            ..BuildStats::default()
        };
        Ok(Self {
            output: HashMap::with_capacity(keys.len()),
            trie: Trie::new(keys),
            storage: ArrayStorage::with_capacity(config.initial_capacity, config.resize_delta)?,
            next_check_pos: 0,
            density_threshold: config.density_threshold,
            stats,
        })
    }

    /// Finds a `begin` such that every sibling's cell `begin + code` is free
    /// and `begin` is not already the base of another group, then claims
    /// those cells.
    fn place(&mut self, siblings: Range<NodeId>) -> Result<usize> {
        if siblings.is_empty() {
            return Err(DartsError::EmptyInput);
        }

        let group = &self.trie.nodes[siblings.clone()];
        let first = group[0].code as usize;
        let last = group[group.len() - 1].code as usize;

        let mut pos = (first + 1).max(self.next_check_pos) - 1;
        let mut occupied = 0usize;
        let mut seen_free = false;

        let begin = loop {
            pos += 1;
            self.storage.ensure(pos + 1)?;
            self.stats.probes += 1;

            if self.storage.check[pos] != 0 {
                occupied += 1;
                continue;
            }
            if !seen_free {
                self.next_check_pos = pos;
                seen_free = true;
            }

            let begin = pos - first;
            self.storage.ensure(begin + last + 1)?;
            if self.storage.used[begin] {
                continue;
            }

            let check = &self.storage.check;
            if group[1..]
                .iter()
                .all(|node| check[begin + node.code as usize] == 0)
            {
                break begin;
            }
        };

        let scanned = pos - self.next_check_pos + 1;
        if occupied as f32 / scanned as f32 >= self.density_threshold {
            self.next_check_pos = pos;
        }

        let cell = to_cell(begin)?;
        self.storage.used[begin] = true;
        for node in &mut self.trie.nodes[siblings.clone()] {
            let index = begin + node.code as usize;
            self.storage.check[index] = cell;
            node.index = Some(index);
        }

        self.stats.groups += 1;
        trace!(
            "placed {} siblings at begin={} (scanned {}, occupied {})",
            siblings.len(),
            begin,
            scanned,
            occupied
        );
        Ok(begin)
    }

    /// Packs the whole trie depth-first, left to right, with an explicit
    /// stack of placed sibling groups.
    fn run(mut self, retain_trie: bool) -> Result<Darts<S>> {
        let root_children = self.trie.fetch(ROOT_NODE)?;
        let root_begin = self.place(root_children.clone())?;
        let root_base = to_cell(root_begin)?;
        self.storage.base[ROOT_INDEX] = root_base;
        {
            let root = &mut self.trie.nodes[ROOT_NODE];
            root.index = Some(ROOT_INDEX);
            root.base = root_base;
        }

        let mut stack = vec![Frame {
            parent: ROOT_NODE,
            begin: root_begin,
            first: root_children.start,
            pending: root_children,
        }];

        while let Some(frame) = stack.last_mut() {
            let begin = frame.begin;
            let Some(id) = frame.pending.next() else {
                if let Some(done) = stack.pop() {
                    if !retain_trie {
                        self.trie.reclaim(done.parent, done.first);
                    }
                }
                continue;
            };

            let index = begin + self.trie.nodes[id].code as usize;
            let children = self.trie.fetch(id)?;

            if children.is_empty() {
                let left = self.trie.nodes[id].left;
                self.storage.base[index] = -(to_cell(left)?) - 1;
                let key = self.trie.prefix(id).unwrap_or_default().to_vec();
                self.output.insert(index, key);
                self.trie.nodes[id].base = END_NODE_BASE;
            } else {
                let child_begin = self.place(children.clone())?;
                let cell = to_cell(child_begin)?;
                self.storage.base[index] = cell;
                self.trie.nodes[id].base = cell;
                stack.push(Frame {
                    parent: id,
                    begin: child_begin,
                    first: children.start,
                    pending: children,
                });
            }
        }

        let array = self.storage.into_array();
        let stats = BuildStats {
            states: array.num_states(),
            capacity: array.len(),
            ..self.stats
        };

        Ok(Darts {
            array,
            output: self.output,
            trie: retain_trie.then_some(self.trie),
            stats,
        })
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds a [`Darts`] from a key set.
///
/// ```rust
/// use darts_rs::{BuildConfig, Builder, Darts};
///
/// let builder = Builder::with_config(BuildConfig {
///     retain_trie: true,
///     ..BuildConfig::default()
/// });
/// let darts: Darts<u8> = builder.build([&b"cat"[..], b"car", b"dog"]).unwrap();
///
/// assert!(darts.contains(b"car"));
/// assert!(!darts.contains(b"ca"));
/// assert!(darts.trie().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    config: BuildConfig,
}

impl Builder {
    /// Builder with [`BuildConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with explicit tuning.
    pub fn with_config(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Configuration used by [`Builder::build`].
    #[inline]
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Builds from any collection of symbol sequences, in any order.
    pub fn build<S, I, K>(&self, keys: I) -> Result<Darts<S>>
    where
        S: Symbol,
        I: IntoIterator<Item = K>,
        K: AsRef<[S]>,
    {
        let keys = keys.into_iter().map(|k| k.as_ref().to_vec()).collect();
        self.build_owned(keys)
    }

    /// Builds from string keys, one symbol per `char`.
    pub fn build_strs<I, K>(&self, keys: I) -> Result<Darts<char>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|k| k.as_ref().chars().collect())
            .collect();
        self.build_owned(keys)
    }

    fn build_owned<S: Symbol>(&self, mut keys: Vec<Vec<S>>) -> Result<Darts<S>> {
        sort_keys(&mut keys, self.config.dedup_keys)?;
        debug!(
            "building double array: {} keys, {:?}",
            keys.len(),
            self.config
        );

        let darts = BuildContext::new(keys, &self.config)?.run(self.config.retain_trie)?;

        let stats = darts.stats;
        debug!(
            "double array built: {} states in {} cells, {} groups, {} probes",
            stats.states, stats.capacity, stats.groups, stats.probes
        );
        Ok(darts)
    }
}

/// Builds with the default configuration.
pub fn build<S, I, K>(keys: I) -> Result<Darts<S>>
where
    S: Symbol,
    I: IntoIterator<Item = K>,
    K: AsRef<[S]>,
{
    Builder::new().build(keys)
}

// =============================================================================
// Double array (lookup)
// =============================================================================

/// Tagged view of one double-array cell.
///
/// Storage keeps the sign encoding: `base < 0` marks a terminal whose
/// `-base - 1` is the left boundary of the key range that ended there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Empty,
    Internal(i32),
    Terminal(usize),
}

/// Finished `base`/`check` arrays. Immutable and freely shareable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoubleArray {
    base: Vec<i32>,
    check: Vec<i32>,
}

impl DoubleArray {
    #[inline]
    pub fn len(&self) -> usize {
        self.base.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    #[inline]
    pub fn base(&self) -> &[i32] {
        &self.base
    }

    #[inline]
    pub fn check(&self) -> &[i32] {
        &self.check
    }

    /// Occupied cells, root included.
    pub fn num_states(&self) -> usize {
        let children = self.check.iter().filter(|&&c| c != 0).count();
        children + usize::from(!self.base.is_empty())
    }

    pub fn state(&self, index: usize) -> State {
        match (self.base.get(index), self.check.get(index)) {
            (Some(&b), Some(&c)) if b == 0 && c == 0 => State::Empty,
            (Some(&b), Some(_)) if b < 0 => State::Terminal((-(i64::from(b)) - 1) as usize),
            (Some(&b), Some(_)) => State::Internal(b),
            _ => State::Empty,
        }
    }

    /// Whether `query` is exactly one of the built keys, walking from the
    /// state at `start` ([`ROOT_INDEX`] for the whole trie).
    #[inline]
    pub fn exact_match_search<S, Q>(&self, query: Q, start: usize) -> bool
    where
        S: Symbol,
        Q: IntoIterator<Item = S>,
    {
        self.terminal_index(query, start).is_some()
    }

    /// Cell of the terminal reached by `query`, if it is an exact match.
    pub fn terminal_index<S, Q>(&self, query: Q, start: usize) -> Option<usize>
    where
        S: Symbol,
        Q: IntoIterator<Item = S>,
    {
        let mut state = i64::from(*self.base.get(start)?);

        for symbol in query {
            // Empty and terminal cells have no outgoing transitions.
            if state <= 0 {
                return None;
            }
            let code: u32 = symbol.into();
            let p = self.cell(state + i64::from(code) + 1)?;
            if i64::from(self.check[p]) != state {
                return None;
            }
            state = i64::from(self.base[p]);
        }

        if state <= 0 {
            return None;
        }
        let p = self.cell(state)?;
        (i64::from(self.check[p]) == state && self.base[p] < 0).then_some(p)
    }

    pub fn memory_usage(&self) -> usize {
        (self.base.capacity() + self.check.capacity()) * std::mem::size_of::<i32>()
    }

    #[inline]
    fn cell(&self, index: i64) -> Option<usize> {
        usize::try_from(index).ok().filter(|&i| i < self.base.len())
    }
}

// =============================================================================
// Build result
// =============================================================================

/// A built double-array trie together with its output mapping.
#[derive(Debug, Clone)]
pub struct Darts<S> {
    array: DoubleArray,
    /// Terminal cell -> key that ends there.
    output: HashMap<usize, Vec<S>>,
    trie: Option<Trie<S>>,
    stats: BuildStats,
}

impl<S: Symbol> Darts<S> {
    #[inline]
    pub fn exact_match<Q: IntoIterator<Item = S>>(&self, query: Q) -> bool {
        self.array.exact_match_search(query, ROOT_INDEX)
    }

    #[inline]
    pub fn exact_match_from<Q: IntoIterator<Item = S>>(&self, query: Q, start: usize) -> bool {
        self.array.exact_match_search(query, start)
    }

    #[inline]
    pub fn contains(&self, key: &[S]) -> bool {
        self.exact_match(key.iter().copied())
    }

    #[inline]
    pub fn terminal<Q: IntoIterator<Item = S>>(&self, query: Q) -> Option<usize> {
        self.array.terminal_index(query, ROOT_INDEX)
    }

    /// The stored key matched by `query`, looked up through the output mapping.
    pub fn get<Q: IntoIterator<Item = S>>(&self, query: Q) -> Option<&[S]> {
        let index = self.terminal(query)?;
        self.output.get(&index).map(Vec::as_slice)
    }

    #[inline]
    pub fn output(&self) -> &HashMap<usize, Vec<S>> {
        &self.output
    }

    #[inline]
    pub fn array(&self) -> &DoubleArray {
        &self.array
    }

    /// The intermediate trie, when built with [`BuildConfig::retain_trie`].
    #[inline]
    pub fn trie(&self) -> Option<&Trie<S>> {
        self.trie.as_ref()
    }

    #[inline]
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Distinct keys stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.output.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn into_array(self) -> DoubleArray {
        self.array
    }
}

impl Darts<char> {
    #[inline]
    pub fn contains_str(&self, key: &str) -> bool {
        self.exact_match(key.chars())
    }
}

// =============================================================================
// Debug dumps
// =============================================================================

impl fmt::Display for DoubleArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "+-----+-----+-----+";
        writeln!(f, "{RULE}")?;
        writeln!(f, "|{:>5}|{:>5}|{:>5}|", "id", "base", "check")?;
        for (idx, (&base, &check)) in self.base.iter().zip(&self.check).enumerate() {
            if base == 0 && check == 0 {
                continue;
            }
            writeln!(f, "{RULE}")?;
            writeln!(f, "|{idx:>5}|{base:>5}|{check:>5}|")?;
        }
        writeln!(f, "{RULE}")
    }
}

impl<S: Symbol> fmt::Display for Trie<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![ROOT_NODE];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            for _ in 0..node.depth {
                f.write_str("  ")?;
            }

            if id == ROOT_NODE {
                f.write_str("root")?;
            } else if node.is_end() {
                f.write_str("$")?;
            } else {
                match self.prefix(id).and_then(<[S]>::last) {
                    Some(symbol) => write!(f, "{symbol:?}")?,
                    None => write!(f, "#{}", node.code)?,
                }
            }

            write!(f, " [{}, {})", node.left, node.right)?;
            if let Some(index) = node.index {
                write!(f, " @{index} base={}", node.base)?;
            }
            writeln!(f)?;

            stack.extend(node.children.clone().rev());
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptests;
