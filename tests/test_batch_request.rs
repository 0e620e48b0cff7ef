use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use s1bands::{
    BackscatterCoefficient, Error, EventFootprint, IngestParams, PolarizationFilter, TimeRange,
    build_batch_request, build_event_request, render_default_evalscript,
};

fn kansas_footprint() -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[
            [-95.712890625, 38.371808917147554],
            [-94.3670654296875, 38.371808917147554],
            [-94.3670654296875, 40.30885442563764],
            [-95.712890625, 40.30885442563764],
            [-95.712890625, 38.371808917147554]
        ]]
    })
}

const WINDOW: &str = "2019-05-22T00:00:00Z/2019-05-23T00:00:00Z";

#[test]
fn test_time_range_parse() {
    let range = TimeRange::parse(WINDOW).unwrap();
    assert_eq!(range.from, Utc.with_ymd_and_hms(2019, 5, 22, 0, 0, 0).unwrap());
    assert_eq!(range.to, Utc.with_ymd_and_hms(2019, 5, 23, 0, 0, 0).unwrap());
}

#[test]
fn test_time_range_normalizes_offsets_to_utc() {
    let range = TimeRange::parse("2019-05-22T02:00:00+02:00/2019-05-22T12:00:00Z").unwrap();
    assert_eq!(range.from, Utc.with_ymd_and_hms(2019, 5, 22, 0, 0, 0).unwrap());
}

#[test]
fn test_time_range_rejects_bad_input() {
    for bad in [
        "2019-05-22T00:00:00Z",
        "2019-05-22/2019-05-23",
        "2019-05-23T00:00:00Z/2019-05-22T00:00:00Z",
        "",
    ] {
        let err = TimeRange::parse(bad).unwrap_err();
        assert!(matches!(err, Error::InvalidTimeRange { .. }), "{bad}");
    }
}

#[test]
fn test_batch_request_body() {
    let request = build_batch_request(
        "US-KS-2019-05",
        kansas_footprint(),
        WINDOW,
        &IngestParams::default(),
    )
    .unwrap();
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["tilingGrid"], json!({"id": 0, "resolution": "10"}));
    assert_eq!(body["output"]["cogOutput"], json!(true));
    assert_eq!(
        body["output"]["defaultTilePath"],
        json!("s3://sentinelhub-batch/glofimr/US-KS-2019-05/<requestId>/<tileName>/<outputId>.tiff")
    );
    assert_eq!(
        body["description"],
        json!("Batch request for S1 data related to US-KS-2019-05")
    );

    let process = &body["processRequest"];
    assert_eq!(process["input"]["bounds"]["geometry"], kansas_footprint());
    assert_eq!(
        process["input"]["bounds"]["properties"]["crs"],
        json!("http://www.opengis.net/def/crs/EPSG/0/4326")
    );
    assert_eq!(
        process["input"]["data"],
        json!([{
            "type": "S1GRD",
            "processing": {"backCoeff": "SIGMA0_ELLIPSOID", "orthorectify": true},
            "dataFilter": {
                "timeRange": {"from": "2019-05-22T00:00:00Z", "to": "2019-05-23T00:00:00Z"},
                "polarization": "DV",
                "acquisitionMode": "IW",
                "resolution": "HIGH"
            }
        }])
    );
    assert_eq!(
        process["evalscript"],
        json!(render_default_evalscript().unwrap())
    );
    assert_eq!(
        process["output"]["responses"],
        json!([
            {"identifier": "VV", "format": {"type": "image/tiff"}},
            {"identifier": "VH", "format": {"type": "image/tiff"}},
            {"identifier": "MASK", "format": {"type": "image/tiff"}}
        ])
    );
}

#[test]
fn test_batch_request_uses_params() {
    let params = IngestParams {
        back_coeff: BackscatterCoefficient::Gamma0Terrain,
        polarization: PolarizationFilter::Vv,
        tile_resolution: 20,
        ..IngestParams::default()
    };
    let request = build_batch_request("evt", kansas_footprint(), WINDOW, &params).unwrap();
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["tilingGrid"]["resolution"], json!("20"));
    let data = &body["processRequest"]["input"]["data"][0];
    assert_eq!(data["processing"]["backCoeff"], json!("GAMMA0_TERRAIN"));
    assert_eq!(data["dataFilter"]["polarization"], json!("VV"));
}

#[test]
fn test_batch_request_rejects_non_polygon_geometry() {
    let point = json!({"type": "Point", "coordinates": [-95.0, 39.0]});
    let err = build_batch_request("evt", point, WINDOW, &IngestParams::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { arg: "geometry.type", .. }));

    let no_coords = json!({"type": "Polygon"});
    let err = build_batch_request("evt", no_coords, WINDOW, &IngestParams::default()).unwrap_err();
    assert!(matches!(err, Error::MissingArgument { .. }));
}

#[test]
fn test_batch_request_rejects_empty_item_id() {
    let err = build_batch_request("  ", kansas_footprint(), WINDOW, &IngestParams::default())
        .unwrap_err();
    assert!(matches!(err, Error::MissingArgument { .. }));
}

#[test]
fn test_batch_request_round_trips_through_json() {
    let request =
        build_batch_request("evt", kansas_footprint(), WINDOW, &IngestParams::default()).unwrap();
    let text = serde_json::to_string(&request).unwrap();
    let parsed: s1bands::BatchRequest = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, request);
}

fn flood_feature() -> Value {
    json!({
        "type": "Feature",
        "id": "US-KS-2019-05",
        "geometry": kansas_footprint(),
        "properties": {
            "Flood_Date": "2019-05-22",
            "Start_Time": "11:45:00",
            "End_Time": "23:59"
        }
    })
}

#[test]
fn test_time_range_from_event_properties() {
    let range = TimeRange::from_event_properties(&flood_feature()["properties"]).unwrap();
    assert_eq!(range.from, Utc.with_ymd_and_hms(2019, 5, 22, 11, 45, 0).unwrap());
    assert_eq!(range.to, Utc.with_ymd_and_hms(2019, 5, 22, 23, 59, 0).unwrap());
    assert_eq!(
        range.to_string(),
        "2019-05-22T11:45:00Z/2019-05-22T23:59:00Z"
    );
    assert_eq!(TimeRange::parse(&range.to_string()).unwrap(), range);
}

#[test]
fn test_time_range_from_event_properties_rejects_bad_fields() {
    let missing = json!({"Flood_Date": "2019-05-22", "Start_Time": "11:45:00"});
    assert!(matches!(
        TimeRange::from_event_properties(&missing),
        Err(Error::MissingArgument { .. })
    ));

    let bad_date = json!({"Flood_Date": "22/05/2019", "Start_Time": "11:45", "End_Time": "12:00"});
    assert!(matches!(
        TimeRange::from_event_properties(&bad_date),
        Err(Error::InvalidTimeRange { .. })
    ));

    let reversed = json!({"Flood_Date": "2019-05-22", "Start_Time": "18:00", "End_Time": "06:00"});
    assert!(matches!(
        TimeRange::from_event_properties(&reversed),
        Err(Error::InvalidTimeRange { .. })
    ));
}

#[test]
fn test_footprint_unwraps_feature() {
    let footprint = EventFootprint::from_geojson(flood_feature()).unwrap();
    assert_eq!(footprint.geometry, kansas_footprint());
    assert_eq!(
        footprint.properties.as_ref().unwrap()["Flood_Date"],
        json!("2019-05-22")
    );

    let bare = EventFootprint::from_geojson(kansas_footprint()).unwrap();
    assert_eq!(bare.geometry, kansas_footprint());
    assert!(bare.properties.is_none());
    assert!(matches!(bare.time_range(), Err(Error::MissingArgument { .. })));
}

#[test]
fn test_footprint_rejects_non_objects_and_empty_features() {
    for bad in [json!([1, 2, 3]), json!("Polygon"), json!(null)] {
        assert!(matches!(
            EventFootprint::from_geojson(bad),
            Err(Error::InvalidArgument { arg: "geojson", .. })
        ));
    }

    let no_geometry = json!({"type": "Feature", "geometry": null, "properties": {}});
    assert!(matches!(
        EventFootprint::from_geojson(no_geometry),
        Err(Error::MissingArgument { .. })
    ));

    let point_feature = json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
        "properties": {}
    });
    assert!(matches!(
        EventFootprint::from_geojson(point_feature),
        Err(Error::InvalidArgument { arg: "geometry.type", .. })
    ));
}

#[test]
fn test_event_request_takes_window_from_feature() {
    let request =
        build_event_request("US-KS-2019-05", flood_feature(), None, &IngestParams::default())
            .unwrap();
    let body = serde_json::to_value(&request).unwrap();
    let process = &body["processRequest"];

    assert_eq!(process["input"]["bounds"]["geometry"], kansas_footprint());
    assert_eq!(
        process["input"]["data"][0]["dataFilter"]["timeRange"],
        json!({"from": "2019-05-22T11:45:00Z", "to": "2019-05-22T23:59:00Z"})
    );
}

#[test]
fn test_event_request_explicit_window_wins() {
    let request = build_event_request(
        "evt",
        flood_feature(),
        Some(WINDOW),
        &IngestParams::default(),
    )
    .unwrap();
    assert_eq!(
        request.process_request.input.data[0].data_filter.time_range,
        TimeRange::parse(WINDOW).unwrap()
    );

    let err = build_event_request("evt", kansas_footprint(), None, &IngestParams::default())
        .unwrap_err();
    assert!(matches!(err, Error::MissingArgument { .. }));
}
