use fts_core::{build_transitions, extract_pairs, forecast, TransitionMap};
use std::thread;

#[test]
fn concurrent_forecasts_share_one_mapping() {
    let history = vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0];
    let map: TransitionMap = build_transitions(&extract_pairs(&history, 2).unwrap());
    let expected = forecast(&history, &map, 2, 12).unwrap();

    let results: Vec<Vec<f64>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| forecast(&history, &map, 2, 12).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
    assert_eq!(history, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0]);
}
