use std::collections::HashMap;

use propath_schema::{FieldKind, Record, RecordType};

#[derive(Record)]
struct Point {
    #[record(json = "x")]
    x: f64,
    #[record(json = "y")]
    y: f64,
}

#[derive(Record)]
#[record(name = "shapes")]
struct Shape {
    #[record(query = "label", bson = "name,omitempty")]
    name: String,
    #[record(bson = "center")]
    center: Point,
    #[record(json = "tags")]
    tags: HashMap<String, String>,
    #[record(json = "extra", interface = Point)]
    extra: Box<dyn std::any::Any>,
    #[record(json = "r#type")]
    r#type: Option<u8>,
    #[record(skip)]
    cached_area: f64,
}

fn main() {
    let table: &'static RecordType = Shape::record_type();
    assert_eq!(table.name(), "shapes");
    assert_eq!(table.len(), 5);
    assert_eq!(table.field_by_alias("label").map(|f| f.name()), Some("name"));
    assert_eq!(table.field_by_name("type").map(|f| f.kind()), Some(&FieldKind::U8));
    assert!(matches!(
        table.field_by_alias("center").map(|f| f.kind()),
        Some(FieldKind::Record(_))
    ));
}
