use picon_core::{PackageListingParser, Picon, TagEvent};
use pretty_assertions::assert_eq;

fn row_events(cells: &[&str]) -> Vec<TagEvent> {
    let mut events = vec![TagEvent::open("tr", &[])];
    for cell in cells {
        events.push(TagEvent::open("td", &[]));
        events.push(TagEvent::text(cell));
        events.push(TagEvent::close("td"));
    }
    events.push(TagEvent::close("tr"));
    events
}

#[test]
fn package_row_yields_picon_with_third_from_last_service_id() {
    let events = row_events(&[
        "/logo/foo.png",
        "Channel X",
        "...",
        "...",
        "...",
        "...",
        "123",
        "",
        "",
    ]);

    let picons = PackageListingParser::new(false).parse(&events);
    assert_eq!(picons, vec![Picon::new("/logo/foo.png", "123")]);
}

#[test]
fn logo_may_sit_in_second_cell() {
    let events = row_events(&["12", "/logo/bar.png", "Bar", "", "", "", "28011", "", ""]);

    let picons = PackageListingParser::new(false).parse(&events);
    assert_eq!(picons, vec![Picon::new("/logo/bar.png", "28011")]);
}

#[test]
fn non_numeric_service_id_yields_nothing() {
    let mut events = row_events(&["/logo/foo.png", "X", "", "", "", "", "12a", "", ""]);
    events.extend(row_events(&["/logo/foo.png", "X", "", "", "", "", "", "", ""]));
    events.extend(row_events(&["nologo", "X", "", "", "", "", "123", "", ""]));

    assert!(PackageListingParser::new(false).parse(&events).is_empty());
}

#[test]
fn single_channel_page_uses_four_cell_rows() {
    let mut events = row_events(&["/logo/chan.png", "Chan", "x", "y"]);
    events.extend(row_events(&["Chan", "/logo/chan.png", "x", "y"]));

    assert_eq!(
        PackageListingParser::new(true).parse(&events),
        vec![Picon::new("/logo/chan.png", "0")]
    );
    assert!(PackageListingParser::new(false)
        .parse(&row_events(&["/logo/chan.png", "Chan", "x", "y"]))
        .is_empty());
}

#[test]
fn single_channel_mode_still_reads_package_rows() {
    let events = row_events(&["/logo/foo.png", "X", "", "", "", "", "77", "", ""]);
    assert_eq!(
        PackageListingParser::new(true).parse(&events),
        vec![Picon::new("/logo/foo.png", "77")]
    );
}

#[test]
fn package_page_html_is_parsed_end_to_end() {
    let html = concat!(
        "<table>",
        "<tr><th>Logo</th><th>Name</th></tr>",
        "<tr><td><img src=\"/logo/tv/das_erste.png\"></td><td>Das Erste</td>",
        "<td>a</td><td>b</td><td>c</td><td>28106</td><td>d</td><td>e</td></tr>",
        "<tr><td><img src=\"/logo/tv/zdf.png\"></td><td>ZDF</td>",
        "<td>a</td><td>b</td><td>c</td><td>n/a</td><td>d</td><td>e</td></tr>",
        "</table>",
    );

    let picons = PackageListingParser::new(false).parse_html(html);
    assert_eq!(picons, vec![Picon::new("/logo/tv/das_erste.png", "28106")]);
}
