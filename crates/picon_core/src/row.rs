use crate::markup::TagEvent;

/// Row-level policy plugged into a [`RowAccumulator`].
pub trait RowHandler {
    /// Called once per closed `<tr>` with the collected cells.
    fn on_row(&mut self, row: Vec<String>);

    /// Called with the first text following a label element, if one is configured.
    fn on_label(&mut self, _text: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccumulatorConfig {
    /// Joins the text fragments of one cell before trimming.
    pub separator: String,
    /// `<img src>` values starting with one of these are appended to the row.
    /// `None` appends every image source.
    pub image_prefixes: Option<Vec<String>>,
    /// `<a href>` values containing one of these are appended to the row.
    pub anchor_markers: Vec<String>,
    /// Element with a single attribute of this value opening a label region.
    pub label: Option<LabelElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelElement {
    pub tag: String,
    pub attr_value: String,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            image_prefixes: None,
            anchor_markers: Vec::new(),
            label: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Data,
    Header,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InRow,
    InCell(CellKind),
}

/// Collects table cells from a tag-event stream and hands each finished row
/// to a [`RowHandler`].
#[derive(Debug)]
pub struct RowAccumulator {
    config: AccumulatorConfig,
    state: State,
    cell: Vec<String>,
    row: Vec<String>,
    in_label: bool,
}

impl RowAccumulator {
    pub fn new(config: AccumulatorConfig) -> Self {
        Self {
            config,
            state: State::Idle,
            cell: Vec::new(),
            row: Vec::new(),
            in_label: false,
        }
    }

    pub fn feed<I, H>(&mut self, events: I, handler: &mut H)
    where
        I: IntoIterator<Item = TagEvent>,
        H: RowHandler + ?Sized,
    {
        for event in events {
            self.process(event, handler);
        }
    }

    pub fn process<H: RowHandler + ?Sized>(&mut self, event: TagEvent, handler: &mut H) {
        match event {
            TagEvent::Open { name, attrs } => self.open_tag(&name, &attrs),
            TagEvent::Text(data) => self.text(&data, handler),
            TagEvent::Close { name } => self.close_tag(&name, handler),
        }
    }

    pub fn is_in_cell(&self) -> bool {
        matches!(self.state, State::InCell(_))
    }

    pub fn is_in_header_cell(&self) -> bool {
        self.state == State::InCell(CellKind::Header)
    }

    fn open_tag(&mut self, name: &str, attrs: &[(String, String)]) {
        match name {
            "tr" => self.state = State::InRow,
            "td" => self.state = State::InCell(CellKind::Data),
            "th" => self.state = State::InCell(CellKind::Header),
            "img" => {
                if let Some(src) = attr(attrs, "src") {
                    let accepted = match &self.config.image_prefixes {
                        None => true,
                        Some(prefixes) => prefixes.iter().any(|p| src.starts_with(p.as_str())),
                    };
                    if accepted {
                        self.row.push(src.to_string());
                    }
                }
            }
            "a" => {
                if let Some(href) = attr(attrs, "href") {
                    if self
                        .config
                        .anchor_markers
                        .iter()
                        .any(|m| href.contains(m.as_str()))
                    {
                        self.row.push(href.to_string());
                    }
                }
            }
            _ => {}
        }

        if let Some(label) = &self.config.label {
            if name == label.tag && attrs.len() == 1 && attrs[0].1 == label.attr_value {
                self.in_label = true;
            }
        }
    }

    fn text<H: RowHandler + ?Sized>(&mut self, data: &str, handler: &mut H) {
        if self.is_in_cell() {
            self.cell.push(data.trim().to_string());
        }
        if self.in_label {
            self.in_label = false;
            handler.on_label(data);
        }
    }

    fn close_tag<H: RowHandler + ?Sized>(&mut self, name: &str, handler: &mut H) {
        match name {
            "td" | "th" => {
                let joined = self.cell.join(&self.config.separator);
                self.row.push(joined.trim().to_string());
                self.cell.clear();
                self.state = State::InRow;
            }
            "tr" => {
                let row = std::mem::take(&mut self.row);
                self.cell.clear();
                self.state = State::Idle;
                handler.on_row(row);
            }
            _ => {}
        }
    }
}

fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
}
