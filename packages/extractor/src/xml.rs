//! Namespace-tolerant structural queries over legislation XML trees.
//!
//! Element names are classified once into a [`Tag`] from their local name,
//! so `ns0:Schedule`, `leg:Schedule` and a default-namespace `Schedule` all
//! match the same variant. All queries return nodes in document order and
//! represent "not found" as `None` or an empty collection.

use roxmltree::Node;

/// Structural and metadata elements the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Main body container of the instrument.
    Body,
    /// A schedule (annex) to the instrument.
    Schedule,
    /// Content container of a schedule.
    ScheduleBody,
    /// Subdivision of a schedule.
    Part,
    /// Titled provision group.
    P1group,
    /// Numbered provision.
    P1,
    /// Provision number.
    Pnumber,
    /// Number of a schedule or part; also `ukm:Number`.
    Number,
    /// Title of a schedule, part, or provision group.
    Title,
    /// Paragraph text.
    Text,
    /// `ukm:SecondaryMetadata`.
    SecondaryMetadata,
    /// `ukm:Year`.
    Year,
    /// `dc:title`.
    DcTitle,
    /// `dct:created`.
    Created,
    /// `dct:valid`.
    Valid,
    /// `dct:type`.
    DocumentType,
    /// `dct:description`.
    Description,
    /// `dct:identifier`.
    Identifier,
    /// `dct:spatial`.
    Spatial,
    /// `rdfs:label`.
    Label,
    /// `dct:replaces`.
    Replaces,
    /// `dct:isReplacedBy`.
    IsReplacedBy,
}

impl Tag {
    /// Classify a local element name.
    #[must_use]
    pub fn from_local_name(name: &str) -> Option<Self> {
        let tag = match name {
            "Body" => Self::Body,
            "Schedule" => Self::Schedule,
            "ScheduleBody" => Self::ScheduleBody,
            "Part" => Self::Part,
            "P1group" => Self::P1group,
            "P1" => Self::P1,
            "Pnumber" => Self::Pnumber,
            "Number" => Self::Number,
            "Title" => Self::Title,
            "Text" => Self::Text,
            "SecondaryMetadata" => Self::SecondaryMetadata,
            "Year" => Self::Year,
            "title" => Self::DcTitle,
            "created" => Self::Created,
            "valid" => Self::Valid,
            "type" => Self::DocumentType,
            "description" => Self::Description,
            "identifier" => Self::Identifier,
            "spatial" => Self::Spatial,
            "label" => Self::Label,
            "replaces" => Self::Replaces,
            "isReplacedBy" => Self::IsReplacedBy,
            _ => return None,
        };
        Some(tag)
    }

    #[cfg(test)]
    fn local_name(self) -> &'static str {
        match self {
            Self::Body => "Body",
            Self::Schedule => "Schedule",
            Self::ScheduleBody => "ScheduleBody",
            Self::Part => "Part",
            Self::P1group => "P1group",
            Self::P1 => "P1",
            Self::Pnumber => "Pnumber",
            Self::Number => "Number",
            Self::Title => "Title",
            Self::Text => "Text",
            Self::SecondaryMetadata => "SecondaryMetadata",
            Self::Year => "Year",
            Self::DcTitle => "title",
            Self::Created => "created",
            Self::Valid => "valid",
            Self::DocumentType => "type",
            Self::Description => "description",
            Self::Identifier => "identifier",
            Self::Spatial => "spatial",
            Self::Label => "label",
            Self::Replaces => "replaces",
            Self::IsReplacedBy => "isReplacedBy",
        }
    }
}

/// Classify an element node. Non-elements and unknown names yield `None`.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use uksi_extractor::xml::{tag_of, Tag};
///
/// let xml = r#"<ns0:Schedule xmlns:ns0="http://www.legislation.gov.uk/namespaces/legislation"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(tag_of(doc.root_element()), Some(Tag::Schedule));
/// ```
pub fn tag_of(node: Node<'_, '_>) -> Option<Tag> {
    if node.is_element() {
        Tag::from_local_name(node.tag_name().name())
    } else {
        None
    }
}

/// Check if a node is an element with the given tag.
pub fn has_tag(node: Node<'_, '_>, tag: Tag) -> bool {
    tag_of(node) == Some(tag)
}

/// Depth-first, document-ordered iterator over the element descendants of
/// a node (the node itself excluded).
///
/// Uses an explicit stack, so tree depth never translates into call depth.
pub struct ElementDescendants<'a, 'input> {
    stack: Vec<Node<'a, 'input>>,
}

impl<'a, 'input> ElementDescendants<'a, 'input> {
    /// Start a traversal below `node`.
    #[must_use]
    pub fn new(node: Node<'a, 'input>) -> Self {
        let mut stack: Vec<_> = node.children().filter(Node::is_element).collect();
        stack.reverse();
        Self { stack }
    }
}

impl<'a, 'input> Iterator for ElementDescendants<'a, 'input> {
    type Item = Node<'a, 'input>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let depth = self.stack.len();
        self.stack.extend(node.children().filter(Node::is_element));
        self.stack[depth..].reverse();
        Some(node)
    }
}

/// Find all element descendants matching a predicate, at any depth.
pub fn find_all<'a, 'input, P>(node: Node<'a, 'input>, predicate: P) -> Vec<Node<'a, 'input>>
where
    P: Fn(Node<'a, 'input>) -> bool,
{
    ElementDescendants::new(node)
        .filter(|n| predicate(*n))
        .collect()
}

/// Find the first descendant with the given tag.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use uksi_extractor::xml::{find_first, Tag};
///
/// let xml = r#"<Schedule><ScheduleBody><P1><Pnumber>1</Pnumber></P1></ScheduleBody></Schedule>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert!(find_first(doc.root_element(), Tag::Pnumber).is_some());
/// assert!(find_first(doc.root_element(), Tag::Part).is_none());
/// ```
pub fn find_first<'a, 'input>(node: Node<'a, 'input>, tag: Tag) -> Option<Node<'a, 'input>> {
    ElementDescendants::new(node).find(|n| has_tag(*n, tag))
}

/// Find all descendants with the given tag, at any depth.
pub fn find_descendants<'a, 'input>(node: Node<'a, 'input>, tag: Tag) -> Vec<Node<'a, 'input>> {
    find_all(node, |n| has_tag(n, tag))
}

/// Find the first direct child with the given tag.
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: Tag) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, tag))
}

/// Find all direct children with the given tag.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: Tag,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| has_tag(*child, tag))
}

/// Find the first node matching a descendant-then-child path.
///
/// `find_path(node, &[Tag::P1, Tag::Pnumber])` answers the query
/// `.//P1/Pnumber`: the first `Pnumber` child of any `P1` descendant,
/// in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use uksi_extractor::xml::{find_path, get_text, Tag};
///
/// let xml = r#"<P1group><Title>Citation</Title><P1><Pnumber>3</Pnumber></P1></P1group>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let nr = find_path(doc.root_element(), &[Tag::P1, Tag::Pnumber]).unwrap();
/// assert_eq!(get_text(nr), "3");
/// ```
pub fn find_path<'a, 'input>(node: Node<'a, 'input>, path: &[Tag]) -> Option<Node<'a, 'input>> {
    let (first, rest) = path.split_first()?;
    ElementDescendants::new(node)
        .filter(|n| has_tag(*n, *first))
        .find_map(|n| follow_children(n, rest))
}

/// Follow child steps from a node, trying every matching child in order.
fn follow_children<'a, 'input>(node: Node<'a, 'input>, steps: &[Tag]) -> Option<Node<'a, 'input>> {
    match steps.split_first() {
        None => Some(node),
        Some((step, rest)) => find_children(node, *step).find_map(|child| follow_children(child, rest)),
    }
}

/// Get the leading text of an element, trimmed.
///
/// Only the text before the first child element is returned, so
/// `<Number>SCHEDULE 1<CommentaryRef/></Number>` yields `"SCHEDULE 1"`.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get all text inside an element, concatenated in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use uksi_extractor::xml::full_text;
///
/// let xml = r#"<Text>This Order may be cited as <Emphasis>the Order</Emphasis>.</Text>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(full_text(doc.root_element()), "This Order may be cited as the Order.");
/// ```
pub fn full_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Get the leading text of the first descendant with the given tag.
///
/// Returns empty text when the descendant is absent or has no text.
pub fn find_text(node: Node<'_, '_>, tag: Tag) -> String {
    find_first(node, tag).map(get_text).unwrap_or_default()
}
