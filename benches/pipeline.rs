//! Benchmarks the canonical pipeline on a manifest-sized synthetic
//! frame (891 rows, the Kaggle training set size).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use titanic_ml::frame::{Frame, Value};
use titanic_ml::titanic;

fn synthetic_manifest(n_rows: usize) -> Frame {
    let mut columns: Vec<(String, Vec<Value>)> = [
        "PassengerId",
        "Survived",
        "Pclass",
        "Name",
        "Sex",
        "Age",
        "SibSp",
        "Parch",
        "Ticket",
        "Fare",
        "Cabin",
        "Embarked",
    ]
    .iter()
    .map(|name| (name.to_string(), Vec::with_capacity(n_rows)))
    .collect();

    for i in 0..n_rows {
        let (name, sex) = match i % 4 {
            0 => (format!("Doe, Mr. John {}", i), "male"),
            1 => (format!("Doe, Mrs. Jane {}", i), "female"),
            2 => (format!("Doe, Miss. Anna {}", i), "female"),
            _ => (format!("Doe, Master. Tom {}", i), "male"),
        };
        let age = if i % 5 == 0 {
            Value::Missing
        } else {
            Value::Num((1 + (i * 3) % 70) as f64)
        };
        let cabin = match i % 4 {
            0 => Value::Str(format!("C{}", i % 120)),
            1 => Value::Str(format!("E{}", i % 120)),
            _ => Value::Missing,
        };
        let embarked = match i % 10 {
            9 => Value::Missing,
            0..=5 => Value::Str("S".to_string()),
            6 | 7 => Value::Str("C".to_string()),
            _ => Value::Str("Q".to_string()),
        };
        let cells = [
            Value::Num((i + 1) as f64),
            Value::Num(f64::from(u8::from(i % 3 == 0))),
            Value::Num((i % 3 + 1) as f64),
            Value::Str(name),
            Value::Str(sex.to_string()),
            age,
            Value::Num((i % 4) as f64),
            Value::Num((i % 3) as f64),
            Value::Str(format!("T{}", i)),
            Value::Num(5.0 + (i * 7 % 200) as f64),
            cabin,
            embarked,
        ];
        for ((_, column), cell) in columns.iter_mut().zip(cells) {
            column.push(cell);
        }
    }
    Frame::from_columns(columns).unwrap()
}

fn bench_pipeline(c: &mut Criterion) {
    let manifest = synthetic_manifest(891);
    let collector = titanic::pipeline(0);

    c.bench_function("titanic_pipeline_891_rows", |b| {
        b.iter(|| {
            let frame = collector.transform(black_box(manifest.clone())).unwrap();
            black_box(frame)
        })
    });

    let features = collector.transform(manifest.clone()).unwrap();
    c.bench_function("feature_matrix_891_rows", |b| {
        b.iter(|| titanic::feature_matrix(black_box(&features), "Survived").unwrap())
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
