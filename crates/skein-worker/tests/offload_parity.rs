//! Offloaded and inline runs must be indistinguishable, and stale runs must
//! never reach the annotation table.

use std::sync::Arc;

use skein_core::matching::cross::cross_match;
use skein_core::{
    CatalogType, Color, CuratedPairing, CuratedPairings, DistanceMethod, MatchAnnotations,
    MatchParams, Rgb,
};
use skein_worker::{CrossMatchRunner, ExecutorKind, MatchExecutor, MatchWorker, WorkerError};

fn sources(n: u8) -> Vec<Color> {
    (0..n)
        .map(|i| {
            let v = i.wrapping_mul(37);
            Color::thread(format!("T{i:03}"), Rgb::new(v, 255 - v, v / 2))
        })
        .collect()
}

fn targets() -> Arc<[Color]> {
    (0..40u8)
        .map(|i| {
            let v = i.wrapping_mul(53);
            Color::reference(format!("PMS {i}"), Rgb::new(255 - v, v, v.wrapping_add(90)))
        })
        .collect::<Vec<_>>()
        .into()
}

fn curated() -> Arc<CuratedPairings> {
    Arc::new(
        std::iter::once(CuratedPairing {
            source_code: "T005".into(),
            target_code: "Chart 5".into(),
            target_rgb: Rgb::new(1, 2, 3),
            distance: 0.5,
        })
        .collect(),
    )
}

#[tokio::test]
async fn test_offloaded_run_matches_inline_run() {
    let src = sources(130);
    let params = MatchParams::new(DistanceMethod::DeltaE2000, true);

    let worker = MatchWorker::spawn().unwrap();
    let mut offloaded = CrossMatchRunner::with_executor(MatchExecutor::with_worker(worker), 50);
    let mut inline = CrossMatchRunner::with_executor(MatchExecutor::inline(), 50);
    assert_eq!(offloaded.executor_kind(), ExecutorKind::Offloaded);

    let a = offloaded.run(&src, targets(), params, curated()).await.unwrap();
    let b = inline.run(&src, targets(), params, curated()).await.unwrap();
    assert_eq!(offloaded.executor_kind(), ExecutorKind::Offloaded);

    assert_eq!(a.matches.len(), 130);
    assert_eq!(a.matches, b.matches);

    let reference = cross_match(&src, &targets(), params, &curated());
    assert_eq!(a.matches, reference);
}

#[tokio::test]
async fn test_runs_share_the_runner_worker() {
    let src = sources(60);
    let mut runner = CrossMatchRunner::with_executor(MatchExecutor::new(true), 50);
    let worker = runner.worker_thread();
    assert!(worker.is_some());

    for method in [DistanceMethod::RgbEuclidean, DistanceMethod::DeltaE2000] {
        let params = MatchParams::new(method, false);
        let out = runner.run(&src, targets(), params, curated()).await.unwrap();
        assert_eq!(out.matches, cross_match(&src, &targets(), params, &curated()));
        assert_eq!(runner.worker_thread(), worker);
    }
}

#[tokio::test]
async fn test_failed_worker_output_is_identical() {
    let src = sources(75);
    let params = MatchParams::new(DistanceMethod::LabEuclidean, false);

    let mut worker = MatchWorker::spawn().unwrap();
    worker.shutdown();
    let mut runner = CrossMatchRunner::with_executor(MatchExecutor::with_worker(worker), 50);

    let out = runner.run(&src, targets(), params, curated()).await.unwrap();
    assert_eq!(runner.executor_kind(), ExecutorKind::Inline);
    assert_eq!(out.matches, cross_match(&src, &targets(), params, &curated()));
}

#[tokio::test]
async fn test_superseded_run_stops_between_batches() {
    let src = sources(4);
    let mut runner = CrossMatchRunner::with_executor(MatchExecutor::inline(), 1);
    let control = runner.control();

    let (result, _) = tokio::join!(
        runner.run(&src, targets(), MatchParams::default(), curated()),
        async {
            tokio::task::yield_now().await;
            control.supersede();
        }
    );

    assert!(matches!(result, Err(WorkerError::Superseded { generation: 1 })));
}

#[tokio::test]
async fn test_stale_output_is_not_applied() {
    let src = sources(10);
    let mut runner = CrossMatchRunner::with_executor(MatchExecutor::inline(), 50);
    let control = runner.control();
    let mut table = MatchAnnotations::new();

    let first = runner
        .run(&src, targets(), MatchParams::default(), curated())
        .await
        .unwrap();
    let second = runner
        .run(&src, targets(), MatchParams::new(DistanceMethod::DeltaE2000, false), curated())
        .await
        .unwrap();

    assert_eq!(
        first.apply_if_current(&control, &mut table, CatalogType::Thread, CatalogType::Reference),
        None
    );
    assert!(table.is_empty());

    let applied =
        second.apply_if_current(&control, &mut table, CatalogType::Thread, CatalogType::Reference);
    assert_eq!(applied, Some(10));
    let annotation = table.get(CatalogType::Thread, "T005").unwrap();
    assert_eq!(annotation.match_method, DistanceMethod::DeltaE2000);
    assert_eq!(annotation.alternatives.len(), 3);
}
