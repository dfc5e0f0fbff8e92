use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

/// One step of a markup walk, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Open {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Close {
        name: String,
    },
}

impl TagEvent {
    pub fn open(name: &str, attrs: &[(&str, &str)]) -> Self {
        TagEvent::Open {
            name: name.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                .collect(),
        }
    }

    pub fn text(data: &str) -> Self {
        TagEvent::Text(data.to_string())
    }

    pub fn close(name: &str) -> Self {
        TagEvent::Close {
            name: name.to_ascii_lowercase(),
        }
    }
}

/// Anything that can produce a tag-event stream for the row accumulator.
pub trait TagEventSource {
    fn tag_events(&self) -> Vec<TagEvent>;
}

impl TagEventSource for Vec<TagEvent> {
    fn tag_events(&self) -> Vec<TagEvent> {
        self.clone()
    }
}

/// HTML text tokenized through the html5ever tree builder.
///
/// Broken markup is repaired by the parser (unclosed cells, stray end tags),
/// so every `Open` has a matching `Close` and the walk never fails.
pub struct HtmlSource<'a> {
    html: &'a str,
}

impl<'a> HtmlSource<'a> {
    pub fn new(html: &'a str) -> Self {
        Self { html }
    }
}

impl TagEventSource for HtmlSource<'_> {
    fn tag_events(&self) -> Vec<TagEvent> {
        tag_events(self.html)
    }
}

pub fn tag_events(html: &str) -> Vec<TagEvent> {
    let document = Html::parse_document(html);
    let mut events = Vec::new();
    for child in document.tree.root().children() {
        visit_node(child, &mut events);
    }
    events
}

fn visit_node(node: NodeRef<'_, Node>, events: &mut Vec<TagEvent>) {
    match node.value() {
        Node::Text(text) => events.push(TagEvent::Text(text.to_string())),
        Node::Element(element) => {
            let name = element.name().to_ascii_lowercase();
            events.push(TagEvent::Open {
                name: name.clone(),
                attrs: element
                    .attrs()
                    .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                    .collect(),
            });
            for child in node.children() {
                visit_node(child, events);
            }
            events.push(TagEvent::Close { name });
        }
        Node::Comment(_) | Node::Doctype(_) | Node::ProcessingInstruction(_) => {}
        _ => {
            for child in node.children() {
                visit_node(child, events);
            }
        }
    }
}
