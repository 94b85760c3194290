use approx::assert_relative_eq;
use proptest::prelude::*;
use vitals_chart::core::{
    Bucket, BucketAxis, PlotRect, PointId, SUB_POINT_LEAD_IN_PX, map_dataset_points,
};

fn plot() -> PlotRect {
    PlotRect::new(10.0, 10.0, 700.0, 300.0)
}

#[test]
fn single_readings_sit_after_lead_in() {
    let axis = BucketAxis::new(plot(), 7);
    assert_relative_eq!(axis.bucket_width(), 100.0);

    let data: Vec<Bucket> = [20.0, 40.0, 60.0].into_iter().map(Bucket::One).collect();
    let points = map_dataset_points(axis, 0, &data);

    assert_eq!(points.len(), 3);
    assert_relative_eq!(points[0].x, 10.0 + SUB_POINT_LEAD_IN_PX);
    assert_relative_eq!(points[1].x, 110.0 + SUB_POINT_LEAD_IN_PX);
    assert_relative_eq!(points[0].y, 290.0);
    assert_relative_eq!(points[2].y, 250.0);
    assert_eq!(points[2].id, PointId::new(0, 2, 0));
}

#[test]
fn sub_points_spread_inside_their_bucket() {
    let axis = BucketAxis::new(plot(), 7);
    let data = vec![Bucket::Empty, Bucket::many([120.0, 130.0, 125.0, 118.0])];
    let points = map_dataset_points(axis, 1, &data);

    assert_eq!(points.len(), 4);
    let spacing = (100.0 - SUB_POINT_LEAD_IN_PX) / 4.0;
    for (sub, point) in points.iter().enumerate() {
        assert_eq!(point.id, PointId::new(1, 1, sub));
        assert_relative_eq!(point.x, 110.0 + SUB_POINT_LEAD_IN_PX + spacing * sub as f64);
    }
    assert!(points.iter().all(|point| point.x < axis.bucket_left(2)));
}

#[test]
fn empty_bucket_does_not_shift_later_buckets() {
    let axis = BucketAxis::new(plot(), 4);
    let with_gap = vec![Bucket::One(50.0), Bucket::Empty, Bucket::One(70.0)];
    let points = map_dataset_points(axis, 0, &with_gap);

    assert_eq!(points.len(), 2);
    assert_eq!(points[1].id.bucket, 2);
    assert_relative_eq!(points[1].x, axis.bucket_left(2) + SUB_POINT_LEAD_IN_PX);
}

#[test]
fn buckets_past_the_labels_and_non_finite_readings_are_skipped() {
    let axis = BucketAxis::new(plot(), 2);
    let data = vec![
        Bucket::many([f64::NAN, 40.0]),
        Bucket::One(50.0),
        Bucket::One(60.0),
    ];
    let points = map_dataset_points(axis, 0, &data);

    let ids: Vec<PointId> = points.iter().map(|point| point.id).collect();
    assert_eq!(ids, vec![PointId::new(0, 0, 1), PointId::new(0, 1, 0)]);
}

#[test]
fn no_labels_maps_nothing() {
    let axis = BucketAxis::new(plot(), 0);
    assert_relative_eq!(axis.bucket_width(), 0.0);
    assert!(map_dataset_points(axis, 0, &[Bucket::One(1.0)]).is_empty());
    assert_eq!(axis.bucket_at_x(50.0), None);
}

#[test]
fn value_and_bucket_mappings_invert() {
    let axis = BucketAxis::new(plot(), 7);
    assert_relative_eq!(axis.y_to_value(axis.value_to_y(137.5)), 137.5);
    assert_eq!(axis.bucket_at_x(10.0), Some(0));
    assert_eq!(axis.bucket_at_x(355.0), Some(3));
    assert_eq!(axis.bucket_at_x(709.9), Some(6));
    assert_eq!(axis.bucket_at_x(710.0), None);
    assert_eq!(axis.bucket_at_x(9.0), None);
}

#[test]
fn data_index_round_trips_through_text() {
    let id = PointId::new(1, 4, 2);
    assert_eq!(id.data_index(), "1,4,2");
    assert_eq!("1,4,2".parse::<PointId>().expect("parse"), id);
    assert_eq!("3, 5".parse::<PointId>().expect("pair"), PointId::new(3, 5, 0));
    assert!("1,x".parse::<PointId>().is_err());
    assert!("1,2,3,4".parse::<PointId>().is_err());
}

proptest! {
    #[test]
    fn bucket_width_divides_plot_width(width in 1.0f64..5_000.0, buckets in 1usize..400) {
        let axis = BucketAxis::new(PlotRect::new(0.0, 0.0, width, 100.0), buckets);
        prop_assert!((axis.bucket_width() - width / buckets as f64).abs() <= 1e-9);
    }

    #[test]
    fn sub_point_x_increases_with_sub_index(
        width in 400.0f64..5_000.0,
        buckets in 1usize..20,
        count in 2usize..8
    ) {
        let axis = BucketAxis::new(PlotRect::new(5.0, 5.0, width, 100.0), buckets);
        let bucket = buckets - 1;
        for sub in 1..count {
            prop_assert!(axis.sub_point_x(bucket, sub, count) > axis.sub_point_x(bucket, sub - 1, count));
        }
    }
}
