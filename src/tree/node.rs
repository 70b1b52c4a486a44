pub(crate) type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    // Height of the subtree rooted here, a leaf has height 1.
    pub(crate) height: usize,
    // Distinct-key accounting: effective size of both children plus one.
    pub(crate) size: usize,
    // Number of times the key has been inserted.
    pub(crate) count: usize,
}

impl<K> Node<K> {
    pub(crate) fn create(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 1,
            size: 1,
            count: 1,
        })
    }

    /// Number of logical elements in the subtree rooted here, duplicates included.
    #[inline]
    pub(crate) fn effective_size(&self) -> usize {
        self.size + self.count - 1
    }
}
