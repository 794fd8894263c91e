//! Fuzz target for building and compiling criteria trees.
//!
//! Arbitrary sequences of builder steps are applied to a tree, which is then
//! compiled with both backends and evaluated against a few records.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_criteria_compile
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use qof::prelude::*;
use qof::GroupId;

#[derive(Reflect)]
struct Tag {
    label: String,
}

#[derive(Reflect)]
struct Record {
    id: i64,
    name: String,
    score: f64,
    active: bool,
    #[qof(collection)]
    tags: Vec<Tag>,
}

#[derive(Debug, Arbitrary, Clone)]
enum FuzzValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<FuzzValue>),
}

impl FuzzValue {
    fn into_value(self, depth: usize) -> FilterValue {
        match self {
            FuzzValue::Null => FilterValue::Null,
            FuzzValue::Bool(b) => FilterValue::Bool(b),
            FuzzValue::Int(i) => FilterValue::Int(i),
            FuzzValue::Float(f) => FilterValue::Float(f),
            FuzzValue::String(s) => FilterValue::String(s),
            FuzzValue::List(_) if depth > 2 => FilterValue::Null,
            FuzzValue::List(items) => {
                FilterValue::List(items.into_iter().map(|v| v.into_value(depth + 1)).collect())
            }
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Step {
    Add { property: u8, operator: u8, value: FuzzValue },
    AddTag { operator: u8, value: FuzzValue },
    AndGroup,
    OrGroup,
    Close,
}

fn operator(code: u8) -> Operator {
    Operator::ALL[code as usize % Operator::ALL.len()]
}

fn records() -> Vec<Record> {
    vec![
        Record {
            id: 1,
            name: "alpha".into(),
            score: 1.5,
            active: true,
            tags: vec![Tag { label: "a".into() }],
        },
        Record {
            id: -7,
            name: String::new(),
            score: f64::NAN,
            active: false,
            tags: Vec::new(),
        },
    ]
}

fuzz_target!(|steps: Vec<Step>| {
    let mut criteria = FilterCriteria::<Record, ()>::new(&());
    let mut current = GroupId::ROOT;

    for step in steps.into_iter().take(64) {
        let Some(builder) = criteria.builder(current) else {
            break;
        };
        let next = match step {
            Step::Add { property, operator: op, value } => {
                let property = Record::PROPERTIES[property as usize % Record::PROPERTIES.len()];
                builder
                    .add_criterion_value(property, value.into_value(0), operator(op))
                    .map(|b| b.id())
            }
            Step::AddTag { operator: op, value } => builder
                .add_collection_criterion(
                    Record::TAGS,
                    Tag::LABEL,
                    |_| value.into_value(0),
                    operator(op),
                )
                .map(|b| b.id()),
            Step::AndGroup => Ok(builder.and_group().id()),
            Step::OrGroup => Ok(builder.or_group().id()),
            Step::Close => Ok(builder.close_group().id()),
        };
        if let Ok(id) = next {
            current = id;
        }
    }

    let converters = FilterConverters::new();
    let sql = converters.to_sql(&criteria, "r");
    if criteria.is_empty() {
        assert_eq!(sql.as_deref().ok(), Some("1 = 1"));
    }

    if let Ok(predicate) = converters.to_predicate(&criteria, "r") {
        let records = records();
        let _ = predicate.filter(&records).count();
    }
});
