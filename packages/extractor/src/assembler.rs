//! Top-level orchestration: one document in, an ordered record set out.

use roxmltree::{Document, Node};
use serde::Serialize;

use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::metadata::{extract_metadata, extract_version_info};
use crate::report::{SkipReason, SkipReporter, TracingReporter};
use crate::selection::ScheduleSelection;
use crate::types::{LegislationMetadata, ProvisionRecord, VersionInfo};
use crate::uri::LegislationUri;
use crate::walker::{element_text, extract_paragraphs, title_text, walk_schedule, WalkOutcome};
use crate::xml::{find_child, find_descendants, find_first, find_path, Tag};

/// Everything extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub metadata: LegislationMetadata,
    pub version: VersionInfo,
    pub records: Vec<ProvisionRecord>,
}

impl Extraction {
    /// Unique identifier of the extracted instrument.
    #[must_use]
    pub fn uid(&self) -> String {
        self.metadata.uid()
    }

    /// Records from the body of the instrument.
    pub fn body_records(&self) -> impl Iterator<Item = &ProvisionRecord> {
        self.records.iter().filter(|r| !r.is_schedule_content())
    }

    /// Records from the schedules of the instrument.
    pub fn schedule_records(&self) -> impl Iterator<Item = &ProvisionRecord> {
        self.records.iter().filter(|r| r.is_schedule_content())
    }
}

/// Extract the provision records of a document.
///
/// Uses the default configuration and logs skipped fragments through
/// `tracing`.
///
/// # Errors
/// Fails only when the document metadata cannot be read.
pub fn extract(doc: &Document<'_>, selection: &ScheduleSelection) -> Result<Vec<ProvisionRecord>> {
    extract_with(
        doc,
        selection,
        &ExtractorConfig::default(),
        &mut TracingReporter,
    )
}

/// Extract the provision records of a document with an explicit
/// configuration and skip reporter.
///
/// Records are returned in document order: body articles first, then
/// the content of each selected schedule.
pub fn extract_with(
    doc: &Document<'_>,
    selection: &ScheduleSelection,
    config: &ExtractorConfig,
    reporter: &mut dyn SkipReporter,
) -> Result<Vec<ProvisionRecord>> {
    let metadata = extract_metadata(doc)?;
    Ok(assemble(doc, &metadata, selection, config, reporter))
}

/// Extract metadata, version information, and records in one pass.
pub fn extract_document(
    doc: &Document<'_>,
    selection: &ScheduleSelection,
    config: &ExtractorConfig,
    reporter: &mut dyn SkipReporter,
) -> Result<Extraction> {
    let metadata = extract_metadata(doc)?;
    let version = extract_version_info(doc);
    let records = assemble(doc, &metadata, selection, config, reporter);

    Ok(Extraction {
        metadata,
        version,
        records,
    })
}

fn assemble(
    doc: &Document<'_>,
    metadata: &LegislationMetadata,
    selection: &ScheduleSelection,
    config: &ExtractorConfig,
    reporter: &mut dyn SkipReporter,
) -> Vec<ProvisionRecord> {
    let root = doc.root_element();
    let uri = LegislationUri::for_metadata(config, metadata);

    // A document without a body yields nothing, schedules included
    let Some(body) = find_first(root, Tag::Body) else {
        reporter.skipped(SkipReason::MissingBody);
        return Vec::new();
    };

    let mut records: Vec<ProvisionRecord> = find_descendants(body, Tag::P1group)
        .into_iter()
        .map(|group| body_record(group, metadata, &uri))
        .collect();
    let body_count = records.len();

    for schedule in find_descendants(root, Tag::Schedule) {
        match walk_schedule(schedule, selection, &uri, reporter) {
            WalkOutcome::Extracted(result) => {
                records.extend(result.content.into_iter().map(|item| {
                    let (part_number, part_title) = match item.part {
                        Some(part) => (Some(part.number), Some(part.title)),
                        None => (None, None),
                    };
                    ProvisionRecord {
                        order_title: metadata.title.clone(),
                        year: metadata.year,
                        number: metadata.number,
                        title: item.title,
                        article_label: item.article_label,
                        paragraphs: item.paragraphs,
                        schedule_number: Some(result.number.clone()),
                        schedule_name: Some(result.name.clone()),
                        part_number,
                        part_title,
                        link: item.link,
                    }
                }));
            }
            WalkOutcome::Skipped(reason) => reporter.skipped(reason),
        }
    }

    tracing::info!(
        uid = %metadata.uid(),
        body = body_count,
        schedules = records.len() - body_count,
        "Extracted provisions"
    );

    records
}

/// Build the record of one body article.
fn body_record(
    group: Node<'_, '_>,
    metadata: &LegislationMetadata,
    uri: &LegislationUri,
) -> ProvisionRecord {
    let label_node = find_path(group, &[Tag::P1, Tag::Pnumber])
        .or_else(|| find_first(group, Tag::Pnumber));
    let article_label = element_text(label_node);

    let link = if article_label.is_empty() {
        uri.document()
    } else {
        uri.article(&article_label)
    };

    ProvisionRecord {
        order_title: metadata.title.clone(),
        year: metadata.year,
        number: metadata.number,
        title: title_text(find_child(group, Tag::Title)),
        article_label,
        paragraphs: extract_paragraphs(group),
        schedule_number: None,
        schedule_name: None,
        part_number: None,
        part_title: None,
        link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DocumentError, MetadataError};
    use crate::report::CollectingReporter;
    use pretty_assertions::assert_eq;

    const HEADER: &str = r#"<Legislation xmlns="http://www.legislation.gov.uk/namespaces/legislation"
    xmlns:ukm="http://www.legislation.gov.uk/namespaces/metadata"
    xmlns:dc="http://purl.org/dc/elements/1.1/">
  <ukm:Metadata>
    <dc:title>The Example Order 2017</dc:title>
    <ukm:SecondaryMetadata><ukm:Year Value="2017"/><ukm:Number Value="766"/></ukm:SecondaryMetadata>
  </ukm:Metadata>"#;

    fn document(content: &str) -> String {
        format!("{HEADER}\n{content}\n</Legislation>")
    }

    fn run(xml: &str, selection: &ScheduleSelection) -> (Vec<ProvisionRecord>, Vec<SkipReason>) {
        let doc = Document::parse(xml).unwrap();
        let mut reporter = CollectingReporter::new();
        let records =
            extract_with(&doc, selection, &ExtractorConfig::default(), &mut reporter).unwrap();
        (records, reporter.into_events())
    }

    fn select(numbers: &[&str]) -> ScheduleSelection {
        numbers.iter().map(|n| ((*n).to_string(), true)).collect()
    }

    #[test]
    fn test_end_to_end_parts_schedule() {
        let xml = document(
            r#"<Primary><Body>
    <P1group><Title>Citation</Title>
      <P1><Pnumber>3</Pnumber><P1para><Text>This Order may be cited as the Example Order 2017.</Text></P1para></P1>
    </P1group>
  </Body></Primary>
  <Schedules><Schedule>
    <Number>SCHEDULE 1</Number>
    <TitleBlock><Title>Transitional Provisions</Title></TitleBlock>
    <ScheduleBody>
      <Part><Number>PART 1</Number><Title>First</Title><P1><P1para><Text>One.</Text></P1para></P1></Part>
      <Part><Number>PART 2</Number><Title>Second</Title><P1><P1para><Text>Two.</Text></P1para></P1></Part>
    </ScheduleBody>
  </Schedule></Schedules>"#,
        );
        let (records, events) = run(&xml, &select(&["1"]));

        assert!(events.is_empty());
        assert_eq!(records.len(), 3);

        let body = &records[0];
        assert_eq!(body.title, "Citation");
        assert_eq!(body.article_label, "3");
        assert_eq!(body.order_title, "The Example Order 2017");
        assert_eq!(
            body.link,
            "https://www.legislation.gov.uk/uksi/2017/766/article/3/made"
        );
        assert!(body.schedule_number.is_none());

        for (record, n) in records[1..].iter().zip(["1", "2"]) {
            assert_eq!(record.article_label, n);
            assert_eq!(record.schedule_number.as_deref(), Some("1"));
            assert_eq!(record.schedule_name.as_deref(), Some("Transitional Provisions"));
            assert_eq!(record.part_number.as_deref(), Some(format!("PART {n}").as_str()));
            assert!(record
                .link
                .ends_with(&format!("/uksi/2017/766/schedule/1/part/{n}/made")));
        }
    }

    #[test]
    fn test_unselected_schedule_does_not_affect_body() {
        let xml = document(
            r#"<Body><P1group><Title>Citation</Title><P1><Pnumber>1</Pnumber><P1para><Text>Body.</Text></P1para></P1></P1group></Body>
  <Schedules><Schedule><Number>SCHEDULE 1</Number><Title>S</Title>
    <ScheduleBody><P1><P1para><Text>Schedule.</Text></P1para></P1></ScheduleBody>
  </Schedule></Schedules>"#,
        );

        let (selected, _) = run(&xml, &select(&["1"]));
        let (unselected, events) = run(&xml, &ScheduleSelection::new());

        assert_eq!(selected.len(), 2);
        assert_eq!(unselected.len(), 1);
        assert_eq!(selected[0], unselected[0]);
        assert_eq!(
            events,
            vec![SkipReason::ScheduleNotSelected {
                number: "1".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_body_returns_empty() {
        let xml = document(
            r#"<Schedules><Schedule><Number>SCHEDULE 1</Number>
    <ScheduleBody><P1><P1para><Text>Orphan.</Text></P1para></P1></ScheduleBody>
  </Schedule></Schedules>"#,
        );
        let (records, events) = run(&xml, &select(&["1"]));

        assert!(records.is_empty());
        assert_eq!(events, vec![SkipReason::MissingBody]);
    }

    #[test]
    fn test_missing_metadata_is_fatal() {
        let xml = r#"<Legislation><Body><P1group><Title>x</Title></P1group></Body></Legislation>"#;
        let doc = Document::parse(xml).unwrap();
        let result = extract(&doc, &ScheduleSelection::new());
        assert!(matches!(
            result,
            Err(DocumentError::Metadata(
                MetadataError::MissingSecondaryMetadata
            ))
        ));
    }

    #[test]
    fn test_body_label_fallbacks() {
        let xml = document(
            r#"<Body>
    <P1group><Title>Nested number</Title><P2><Pnumber>4A</Pnumber></P2></P1group>
    <P1group><Title>No number</Title><P1><P1para><Text>Unnumbered.</Text></P1para></P1></P1group>
  </Body>"#,
        );
        let (records, _) = run(&xml, &ScheduleSelection::new());

        assert_eq!(records[0].article_label, "4A");
        assert_eq!(
            records[0].link,
            "https://www.legislation.gov.uk/uksi/2017/766/article/4A/made"
        );
        assert_eq!(records[1].article_label, "");
        assert_eq!(records[1].link, "https://www.legislation.gov.uk/uksi/2017/766/made");
    }

    #[test]
    fn test_body_title_is_direct_child_only() {
        let xml = document(
            r#"<Body><P1group><P1><Pnumber>2</Pnumber><Title>inner</Title></P1></P1group></Body>"#,
        );
        let (records, _) = run(&xml, &ScheduleSelection::new());
        assert_eq!(records[0].title, "");
    }

    #[test]
    fn test_output_follows_document_order() {
        let xml = document(
            r#"<Body>
    <Part><P1group><Title>A</Title><P1><Pnumber>1</Pnumber></P1></P1group></Part>
    <P1group><Title>B</Title><P1><Pnumber>2</Pnumber></P1></P1group>
  </Body>
  <Schedules>
    <Schedule><Number>SCHEDULE 2</Number><ScheduleBody><P1><Pnumber>x</Pnumber></P1></ScheduleBody></Schedule>
    <Schedule><Number>SCHEDULE 1</Number><ScheduleBody><P1><Pnumber>y</Pnumber></P1></ScheduleBody></Schedule>
  </Schedules>"#,
        );
        let (records, _) = run(&xml, &select(&["1", "2"]));

        let labels: Vec<_> = records.iter().map(|r| r.article_label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "x", "y"]);
        let schedules: Vec<_> = records
            .iter()
            .filter_map(|r| r.schedule_number.as_deref())
            .collect();
        assert_eq!(schedules, vec!["2", "1"]);
    }

    #[test]
    fn test_faulty_schedule_is_isolated() {
        let xml = document(
            r#"<Body/>
  <Schedules>
    <Schedule><Title>No number</Title><ScheduleBody><P1><Pnumber>1</Pnumber></P1></ScheduleBody></Schedule>
    <Schedule><Number>SCHEDULE 2</Number></Schedule>
    <Schedule><Number>SCHEDULE 3</Number><ScheduleBody><P1><Pnumber>9</Pnumber></P1></ScheduleBody></Schedule>
  </Schedules>"#,
        );
        let (records, events) = run(&xml, &select(&["1", "2", "3"]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].schedule_number.as_deref(), Some("3"));
        assert_eq!(
            events,
            vec![
                SkipReason::ScheduleWithoutNumber,
                SkipReason::ScheduleWithoutBody {
                    number: "2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_extract_document() {
        let xml = document(r#"<Body><P1group><Title>T</Title><P1><Pnumber>1</Pnumber></P1></P1group></Body>"#);
        let doc = Document::parse(&xml).unwrap();
        let config = ExtractorConfig::with_base_url("http://mirror.local/").unwrap();
        let mut reporter = CollectingReporter::new();

        let extraction =
            extract_document(&doc, &ScheduleSelection::new(), &config, &mut reporter).unwrap();

        assert_eq!(extraction.uid(), "2017_766");
        assert!(extraction.version.is_current);
        assert_eq!(extraction.body_records().count(), 1);
        assert_eq!(extraction.schedule_records().count(), 0);
        assert_eq!(
            extraction.records[0].link,
            "http://mirror.local/uksi/2017/766/article/1/made"
        );
    }
}
