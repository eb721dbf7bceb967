//! Serialization tests for axes and storage (`serde` feature).

#![cfg(feature = "serde")]

use multihist::axis::{Category, Circular, Integer, Regular, Transform, Variable};
use multihist::{AnyAxis, ArrayStorage, Axis, AxisOptions, Histogram};

fn axes() -> Vec<AnyAxis> {
    vec![
        Regular::with_options(4, 1.0, 100.0, Transform::Log, AxisOptions::labeled("energy"))
            .unwrap()
            .into(),
        Variable::new(vec![0.0, 0.5, 2.0]).unwrap().into(),
        Integer::with_options(-1, 3, AxisOptions::default().without_flow())
            .unwrap()
            .into(),
        Circular::new(6).unwrap().into(),
        Category::new(vec![7, 3, 5]).unwrap().into(),
    ]
}

#[test]
fn axes_round_trip_through_json() {
    let axes = axes();
    let json = serde_json::to_string(&axes).unwrap();
    let back: Vec<AnyAxis> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, axes);
    assert_eq!(back[0].label(), "energy");
    assert_eq!(back[4].index(&5.0), 2);
}

#[test]
fn category_rebuilds_lookup() {
    let axis = Category::with_options(
        vec!["x".to_string(), "y".to_string()],
        AxisOptions::labeled("tag"),
    )
    .unwrap();
    let json = serde_json::to_string(&axis).unwrap();
    let back: Category<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.index(&"y".to_string()), 1);
    assert_eq!(back.label(), "tag");
}

#[test]
fn category_duplicates_rejected_on_load() {
    let result: Result<Category<i32>, _> = serde_json::from_str(r#"{"values":[1,2,1]}"#);
    assert!(result.is_err());
}

#[test]
fn histogram_restored_from_parts() {
    let mut hist: Histogram<_> = Histogram::new(axes()).unwrap();
    hist.fill(&[10.0, 1.0, 0.0, 1.0, 3.0]).unwrap();
    hist.fill_weighted(&[1000.0, -1.0, 2.0, 4.0, 7.0], 2.0).unwrap();

    let (axes, storage) = hist.clone().into_parts();
    let axes_json = serde_json::to_string(&axes).unwrap();
    let storage_json = serde_json::to_string(&storage).unwrap();

    let axes: Vec<AnyAxis> = serde_json::from_str(&axes_json).unwrap();
    let storage: ArrayStorage<f64> = serde_json::from_str(&storage_json).unwrap();
    let restored = Histogram::with_storage(axes, storage).unwrap();
    assert_eq!(restored, hist);
    assert_eq!(restored.iter().sum::<f64>(), 3.0);
}
