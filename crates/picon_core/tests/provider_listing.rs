use std::sync::Once;

use picon_core::{sort_by_logo, Provider, ProviderListingParser, TagEvent};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(picon_logging::initialize_for_tests);
}

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

fn provider_cells<'a>(name: &'a str, id: &'a str) -> Vec<&'a str> {
    vec![
        "", "", "", "/logo/sky.png", "", "https://www.lyngsat.com/packages/Sky.html", name, "",
        "", id, "", "", "", "",
    ]
}

const SATELLITE_PAGE: &str = concat!(
    "<html><body><table>",
    "<tr><td>Astra 1KR/1L/1M/1N at 19.2\u{b0}E</td></tr>",
    "<tr><td>1</td><td>11778 V</td><td><font color=\"darkgreen\">1026-5</font></td></tr>",
    "<tr><td>a</td><td>b</td><td>c</td>",
    "<td><img src=\"/logo/p/sky.png\"></td>",
    "<td><a href=\"https://www.lyngsat.com/packages/Sky.html\">Sky Deutschland</a></td>",
    "<td>x</td><td>y</td><td>133-5</td>",
    "<td>1</td><td>2</td><td>3</td><td>4</td></tr>",
    "<tr><td>4567</td>",
    "<td><a href=\"https://www.lyngsat.com/tvchannels/Chan.html\">Chan</a></td>",
    "<td>1</td><td>2</td><td>3</td><td>4</td><td>5</td></tr>",
    "</table></body></html>",
);

#[test]
fn satellite_page_yields_providers_and_single_channels() {
    init_logging();
    let providers = ProviderListingParser::new().parse_html(SATELLITE_PAGE);

    assert_eq!(
        providers,
        vec![
            Provider {
                logo: None,
                logo_ref: Some("/logo/p/sky.png".to_string()),
                name: "Sky Deutschland".to_string(),
                position: "192E".to_string(),
                url: "https://www.lyngsat.com/packages/Sky.html".to_string(),
                network_id: "133".to_string(),
                service_id: None,
                single_channel: false,
                selected: true,
            },
            Provider {
                logo: None,
                logo_ref: None,
                name: "Chan".to_string(),
                position: "192E".to_string(),
                url: "https://www.lyngsat.com/tvchannels/Chan.html".to_string(),
                network_id: "1026::11778".to_string(),
                service_id: Some("4567".to_string()),
                single_channel: true,
                selected: false,
            },
        ]
    );
}

#[test]
fn repeated_network_id_yields_one_provider() {
    init_logging();
    let mut events = row_events(&provider_cells("Sky Deutschland", "133-5"));
    events.extend(row_events(&provider_cells("Sky Sport", "133-7")));
    events.extend(row_events(&provider_cells("Sky Deutschland", "133-5")));

    let providers = ProviderListingParser::new().parse(&events);
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].name, "Sky Deutschland");
    assert_eq!(providers[0].network_id, "133");
}

#[test]
fn distinct_network_ids_yield_distinct_providers() {
    let mut events = row_events(&provider_cells("Sky", "133-5"));
    events.extend(row_events(&provider_cells("Sky", "1-1026")));

    let providers = ProviderListingParser::new().parse(&events);
    let ids: Vec<_> = providers.iter().map(|p| p.network_id.as_str()).collect();
    assert_eq!(ids, vec!["133", "1"]);
}

#[test]
fn provider_row_without_id_is_dropped() {
    let events = row_events(&provider_cells("Sky", "n/a"));
    assert!(ProviderListingParser::new().parse(&events).is_empty());
}

#[test]
fn frequency_is_inherited_by_rows_below_it() {
    let mut events = row_events(&["1", "10744 H", "DVB-S2"]);
    events.extend(row_events(&["https://x/tvchannels/a.html", "A", "", "", "", "", ""]));
    events.extend(row_events(&["2", "no frequency here", "x"]));
    events.extend(row_events(&["https://x/tvchannels/b.html", "B", "", "", "", "", ""]));
    events.extend(row_events(&["3", "12603 V", "x"]));
    events.extend(row_events(&["https://x/tvchannels/c.html", "C", "", "", "", "", ""]));

    let providers = ProviderListingParser::new().parse(&events);
    let ids: Vec<_> = providers
        .iter()
        .map(|p| (p.name.as_str(), p.network_id.as_str()))
        .collect();
    assert_eq!(
        ids,
        vec![("A", "1::10744"), ("B", "1::10744"), ("C", "1::12603")]
    );
}

#[test]
fn channel_url_in_first_cell_is_also_its_service_id() {
    let events = row_events(&["https://x/tvchannels/a.html", "A", "", "", "", "", ""]);

    let providers = ProviderListingParser::new().parse(&events);
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].name, "A");
    assert_eq!(providers[0].url, "https://x/tvchannels/a.html");
    assert_eq!(
        providers[0].service_id.as_deref(),
        Some("https://x/tvchannels/a.html")
    );
}

#[test]
fn first_position_wins() {
    let mut events = row_events(&["Eutelsat at 5.0\u{b0}W"]);
    events.extend(row_events(&["Hotbird at 13.0\u{b0}E"]));
    events.extend(row_events(&provider_cells("Sky", "133-5")));

    let providers = ProviderListingParser::new().parse(&events);
    assert_eq!(providers[0].position, "50W");
}

#[test]
fn rows_of_other_lengths_are_discarded() {
    let mut events = row_events(&["https://x/a.html", "A", "", "", "", ""]);
    events.extend(row_events(&vec!["https://x/a.html"; 15]));

    assert!(ProviderListingParser::new().parse(&events).is_empty());
}

#[test]
fn broken_markup_degrades_to_partial_results() {
    let html = "<table><tr><td>1<td>11778 V<td>x</tr><tr><td>https://x/a.html<td>A<td><td><td><td><td></table";
    let providers = ProviderListingParser::new().parse_html(html);
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].network_id, "1::11778");

    assert!(ProviderListingParser::new().parse_html("<<<>>>").is_empty());
}

fn provider(name: &str, logo: Option<&[u8]>) -> Provider {
    Provider {
        logo: logo.map(<[u8]>::to_vec),
        logo_ref: None,
        name: name.to_string(),
        position: "192E".to_string(),
        url: String::new(),
        network_id: "1".to_string(),
        service_id: None,
        single_channel: false,
        selected: true,
    }
}

#[test]
fn logo_sort_is_stable_and_idempotent() {
    let mut providers = vec![
        provider("a", None),
        provider("b", Some(b"png")),
        provider("c", Some(b"")),
        provider("d", Some(b"png")),
    ];

    sort_by_logo(&mut providers);
    let names: Vec<_> = providers.iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["b", "d", "a", "c"]);

    let sorted = providers.clone();
    sort_by_logo(&mut providers);
    assert_eq!(providers, sorted);
}
