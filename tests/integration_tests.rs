use pinmap::prelude::*;
use std::sync::{Arc, Mutex};

/// Integration tests for real user interactions with the pin map.
/// These tests drive the canvas the way the rendering surface does.
#[cfg(test)]
mod integration_tests {
    use super::*;

    fn seattle_canvas() -> MapCanvas {
        MapCanvas::new(
            InitialViewState::default(),
            Point::new(600.0, 600.0),
            seattle_locations(),
        )
        .unwrap()
    }

    fn left_click(position: Point) -> InputEvent {
        InputEvent::Click {
            position,
            button: MouseButton::Left,
        }
    }

    fn hidden_ids(canvas: &MapCanvas) -> Vec<u32> {
        canvas
            .markers()
            .filter(|marker| marker.state() == MarkerState::Hidden)
            .map(|marker| marker.record_id())
            .collect()
    }

    #[test]
    fn test_one_hidden_marker_per_record() {
        println!("🧪 [TEST] Markers are created per record, all hidden");

        for n in 0..=seattle_locations().len() {
            let canvas = MapCanvas::new(
                InitialViewState::default(),
                Point::new(600.0, 600.0),
                &seattle_locations()[..n],
            )
            .unwrap();

            assert_eq!(canvas.marker_count(), n);
            assert_eq!(hidden_ids(&canvas).len(), n);
            assert!(canvas.visible_popups().is_empty());
        }
    }

    #[test]
    fn test_empty_map_has_no_markers() {
        let mut canvas =
            MapCanvas::new(InitialViewState::default(), Point::new(600.0, 600.0), &[]).unwrap();
        assert_eq!(canvas.marker_count(), 0);

        // A click anywhere is a background click
        assert_eq!(
            canvas.handle_input(left_click(Point::new(300.0, 300.0))),
            EventHandled::Handled
        );
        let events = canvas.process_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], MapEvent::Click { .. }));
    }

    #[test]
    fn test_markers_keep_input_order_and_ids() {
        let canvas = seattle_canvas();
        assert_eq!(canvas.marker_ids(), &[1, 2, 3, 4, 5, 6]);
        for (marker, record) in canvas.markers().zip(seattle_locations()) {
            assert_eq!(marker.record(), record);
        }
    }

    #[test]
    fn test_clicking_underground_tour_shows_only_its_popup() {
        println!("🧪 [TEST] Clicking marker 3 opens one popup");

        let mut canvas = seattle_canvas();
        assert_eq!(canvas.click_marker(3).unwrap(), EventHandled::Handled);

        let popups = canvas.visible_popups();
        assert_eq!(popups.len(), 1);
        let popup = &popups[0];
        assert_eq!(popup.marker_id, 3);
        assert_eq!(popup.title, "Seattle Underground Tour");
        assert_eq!(
            popup.description,
            "Seattle has so much history! I was able to walk through an old bootlegger's hole from prohibition days."
        );
        assert_eq!(
            popup.image,
            "https://aws-map-seattle-blog-pics.s3.amazonaws.com/public/IMG_4826.jpg"
        );
        assert_eq!(popup.anchor, LatLng::new(47.6023561, -122.3358691));

        assert_eq!(canvas.marker(3).unwrap().state(), MarkerState::Shown);
        assert_eq!(hidden_ids(&canvas), vec![1, 2, 4, 5, 6]);
    }

    #[test]
    fn test_multiple_popups_can_be_open() {
        let mut canvas = seattle_canvas();
        canvas.click_marker(1).unwrap();
        canvas.click_marker(2).unwrap();

        assert_eq!(canvas.shown_marker_ids(), vec![1, 2]);
        assert_eq!(hidden_ids(&canvas), vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_close_action_hides_only_that_marker() {
        let mut canvas = seattle_canvas();
        canvas.click_marker(1).unwrap();
        canvas.click_marker(5).unwrap();

        assert_eq!(
            canvas.handle_input(InputEvent::PopupClose { marker_id: 5 }),
            EventHandled::Handled
        );
        assert_eq!(canvas.shown_marker_ids(), vec![1]);
        assert!(canvas.visible_popups().iter().all(|p| p.marker_id != 5));
    }

    #[test]
    fn test_close_on_hidden_marker_is_noop() {
        let mut canvas = seattle_canvas();
        assert_eq!(canvas.close_popup(4).unwrap(), EventHandled::NotHandled);
        assert_eq!(canvas.marker(4).unwrap().state(), MarkerState::Hidden);
        assert!(canvas.process_events().is_empty());
    }

    #[test]
    fn test_marker_click_is_not_a_map_click() {
        println!("🧪 [TEST] A consumed marker click never reaches the dismiss handler");

        let mut canvas = seattle_canvas();
        let map_clicks = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&map_clicks);
        canvas.on(MapEventKind::Click, move |_| {
            *counter.lock().unwrap() += 1;
        });

        canvas.click_marker(2).unwrap();

        // Click the glyph of marker 1 through hit-testing while 2 is open
        let tip = canvas
            .viewport()
            .lat_lng_to_pixel(&canvas.marker(1).unwrap().position());
        canvas.handle_input(left_click(Point::new(tip.x, tip.y - 10.0)));

        assert_eq!(canvas.shown_marker_ids(), vec![1, 2]);
        canvas.process_events();
        assert_eq!(*map_clicks.lock().unwrap(), 0);

        // A background click is a map click and dismisses both popups
        canvas.handle_input(left_click(Point::new(10.0, 590.0)));
        canvas.process_events();
        assert_eq!(*map_clicks.lock().unwrap(), 1);
        assert!(canvas.shown_marker_ids().is_empty());
    }

    #[test]
    fn test_background_click_keeps_popups_when_dismiss_disabled() {
        let mut config = MapConfig::default();
        config.popup.close_on_map_click = false;
        let mut canvas = MapCanvas::from_config(&config, seattle_locations()).unwrap();

        canvas.click_marker(6).unwrap();
        canvas.handle_input(left_click(Point::new(10.0, 10.0)));
        assert_eq!(canvas.shown_marker_ids(), vec![6]);

        canvas.close_popup(6).unwrap();
        assert!(canvas.shown_marker_ids().is_empty());
    }

    #[test]
    fn test_popup_lifecycle_events() {
        let mut canvas = seattle_canvas();
        let log = Arc::new(Mutex::new(Vec::new()));

        for kind in [MapEventKind::PopupOpen, MapEventKind::PopupClose] {
            let sink = Arc::clone(&log);
            canvas.on(kind, move |event| sink.lock().unwrap().push(event.clone()));
        }

        canvas.click_marker(3).unwrap();
        canvas.click_marker(3).unwrap();
        canvas.close_popup(3).unwrap();
        canvas.close_popup(3).unwrap();
        canvas.process_events();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                MapEvent::PopupOpen { marker_id: 3 },
                MapEvent::PopupClose { marker_id: 3 }
            ]
        );
    }

    #[test]
    fn test_popups_follow_their_marker_when_panning() {
        let mut canvas = seattle_canvas();
        canvas.click_marker(3).unwrap();

        let before = canvas.visible_popups()[0].screen_anchor(canvas.viewport());
        canvas.handle_input(InputEvent::Drag {
            delta: Point::new(40.0, -25.0),
        });
        let after = canvas.visible_popups()[0].screen_anchor(canvas.viewport());

        assert!((after.x - before.x - 40.0).abs() < 1e-6);
        assert!((after.y - before.y + 25.0).abs() < 1e-6);
        assert_eq!(canvas.shown_marker_ids(), vec![3]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut records = seattle_locations().to_vec();
        records.push(records[0].clone());
        let result = MapCanvas::new(
            InitialViewState::default(),
            Point::new(600.0, 600.0),
            &records,
        );
        assert!(matches!(result, Err(MapError::DuplicateLocationId(1))));
    }
}
