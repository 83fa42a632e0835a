// Integration tests for claimcheck
use claimcheck_core::Record;
use claimcheck_report::{Evaluator, Reporter};
use claimcheck_similarity::{fields, MatchStatus, ValidationSchema};
use claimcheck_storage::{JsonlSource, ReportSink};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::io::Write;

fn record(value: Value) -> Record {
    Record::from_value(1, value).unwrap()
}

fn scenario_batch() -> Vec<Record> {
    vec![
        // every field extracted exactly
        record(json!({
            "id": 1,
            "ground_truth": {
                "fecha": "2024-03-14",
                "lugar": "Av. Corrientes 1500",
                "vehiculo_asegurado": "Toyota Corolla",
                "vehiculo_tercero": "Ford Fiesta",
                "responsabilidad": "tercero"
            },
            "extracted_data": {
                "fecha": "2024-03-14",
                "ubicacion": "Av. Corrientes 1500",
                "vehiculo_asegurado": "Toyota Corolla",
                "vehiculo_tercero": "Ford Fiesta",
                "responsabilidad_aparente": "tercero"
            },
            "processing_time": 1.0
        })),
        // third-party vehicle reported as the insured one
        record(json!({
            "id": 2,
            "ground_truth": {
                "fecha": "2024-03-15",
                "lugar": "Calle Florida",
                "vehiculo_asegurado": "Renault Sandero",
                "vehiculo_tercero": "Peugeot 208",
                "responsabilidad": "asegurado"
            },
            "extracted_data": {
                "fecha": "2024-03-15",
                "ubicacion": "florida",
                "vehiculo_asegurado": "Peugeot 208",
                "vehiculo_tercero": "208 Peugeot",
                "responsabilidad_aparente": "asegurado"
            },
            "processing_time": 2.0
        })),
        // single-vehicle incident: no third party on either side
        record(json!({
            "id": 3,
            "ground_truth": {
                "fecha": "2024-03-16",
                "lugar": "Ruta 2 km 40",
                "vehiculo_asegurado": "Fiat Cronos",
                "responsabilidad": "asegurado"
            },
            "extracted_data": {
                "fecha": "2024-03-16",
                "ubicacion": "Ruta 2, km 40",
                "vehiculo_asegurado": "mi Fiat Cronos",
                "vehiculo_tercero": null,
                "responsabilidad_aparente": "asegurado"
            },
            "processing_time": 3.0
        })),
    ]
}

#[test]
fn test_end_to_end_scenario() {
    let evaluation = Evaluator::default().evaluate(&scenario_batch());
    let summary = Reporter::new(&evaluation, &[]).summary();

    assert_eq!(summary.total_claims, 3);
    assert_eq!(summary.accuracy(fields::VEHICULO_TERCERO), Some(100.0));
    assert_eq!(summary.accuracy(fields::FECHA), Some(100.0));
    assert_eq!(summary.accuracy(fields::UBICACION), Some(100.0));
    assert_eq!(summary.swap_count, 1);
    assert!((summary.swap_rate - 33.3).abs() < 0.05);
    assert_eq!(summary.mean_processing_time, 2.0);

    let asegurado = summary.accuracy(fields::VEHICULO_ASEGURADO).unwrap();
    assert!((asegurado - 200.0 / 3.0).abs() < 1e-9);

    assert_eq!(evaluation.diagnostics.len(), 1);
    let d = &evaluation.diagnostics[0];
    assert_eq!(d.record_id, 2);
    assert_eq!(d.field, fields::VEHICULO_ASEGURADO);
    assert_eq!(d.status, MatchStatus::Swapped);
}

#[test]
fn test_full_swap_counts_record_once() {
    let batch = vec![record(json!({
        "id": 10,
        "ground_truth": {"vehiculo_asegurado": "Toyota Corolla", "vehiculo_tercero": "Ford Fiesta"},
        "extracted_data": {"vehiculo_asegurado": "Ford Fiesta", "vehiculo_tercero": "Toyota Corolla"}
    }))];

    let evaluation = Evaluator::default().evaluate(&batch);
    assert_eq!(evaluation.metrics.swap_count(), 1);
    assert_eq!(evaluation.metrics.swap_rate(), 1.0);
    assert_eq!(evaluation.diagnostics.len(), 2);
    assert!(evaluation
        .diagnostics
        .iter()
        .all(|d| d.status == MatchStatus::Swapped));
}

fn synthetic_batch(n: u64) -> Vec<Record> {
    let vehicles = ["Toyota Corolla", "Ford Fiesta", "Chevrolet Onix", "Volkswagen Gol"];
    let streets = ["Av. Rivadavia", "Calle Mitre", "Av. Santa Fe", "Ruta 8"];

    (0..n)
        .map(|i| {
            let i_usize = i as usize;
            let asegurado = vehicles[i_usize % vehicles.len()];
            let tercero = vehicles[(i_usize + 1) % vehicles.len()];
            let street = streets[i_usize % streets.len()];
            let (ext_asegurado, ext_tercero) = if i % 5 == 0 {
                (tercero, asegurado)
            } else {
                (asegurado, tercero)
            };
            let ext_street = if i % 3 == 0 { "desconocido" } else { street };
            let ext_resp = if i % 4 == 0 { "indeterminado" } else { "tercero" };

            record(json!({
                "id": i,
                "ground_truth": {
                    "fecha": format!("2024-02-{:02}", i % 28 + 1),
                    "lugar": street,
                    "vehiculo_asegurado": asegurado,
                    "vehiculo_tercero": tercero,
                    "responsabilidad": "tercero"
                },
                "extracted_data": {
                    "fecha": format!("2024-02-{:02}", i % 28 + 1),
                    "ubicacion": ext_street,
                    "vehiculo_asegurado": ext_asegurado,
                    "vehiculo_tercero": ext_tercero,
                    "responsabilidad_aparente": ext_resp
                },
                "processing_time": (i % 7) as f64 * 0.5
            }))
        })
        .collect()
}

#[test]
fn test_aggregation_is_order_independent() {
    let evaluator = Evaluator::default();
    let mut records = synthetic_batch(60);
    let baseline = Reporter::new(&evaluator.evaluate(&records), &[]).summary();
    assert!(baseline.swap_count > 0);

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..5 {
        records.shuffle(&mut rng);
        let shuffled = Reporter::new(&evaluator.evaluate(&records), &[]).summary();
        assert_eq!(shuffled.field_accuracy, baseline.field_accuracy);
        assert_eq!(shuffled.swap_count, baseline.swap_count);
        assert_eq!(shuffled.swap_rate, baseline.swap_rate);
    }
}

#[test]
fn test_parallel_partitions_match_sequential() {
    let evaluator = Evaluator::default();
    let records = synthetic_batch(101);
    let sequential = evaluator.evaluate(&records);

    for partitions in [2, 4, 7] {
        let parallel = evaluator.evaluate_partitioned(&records, partitions);
        assert_eq!(parallel.diagnostics, sequential.diagnostics);
        assert_eq!(parallel.metrics.swap_count(), sequential.metrics.swap_count());
        assert_eq!(parallel.metrics.record_count(), sequential.metrics.record_count());
        for (name, counter) in sequential.metrics.fields() {
            assert_eq!(parallel.metrics.field(name), Some(counter));
        }
    }
}

#[test]
fn test_field_totals_equal_record_count() {
    let evaluation = Evaluator::default().evaluate(&synthetic_batch(25));
    let schema = ValidationSchema::claims();

    for spec in schema.fields.iter().filter(|s| !s.optional) {
        let counter = evaluation.metrics.field(&spec.extracted).unwrap();
        assert_eq!(counter.total, 25);
        assert!(counter.matches <= counter.total);
    }
    assert!(evaluation.metrics.swap_count() <= evaluation.metrics.record_count());
}

#[test]
fn test_jsonl_file_to_report() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    for r in scenario_batch() {
        writeln!(input, "{}", serde_json::to_string(&r).unwrap()).unwrap();
    }
    writeln!(input, r#"{{"id": 4, "extracted_data": {{}}}}"#).unwrap();

    let batch = JsonlSource::new(input.path()).read().unwrap();
    assert_eq!(batch.records.len(), 3);
    assert_eq!(batch.skipped.len(), 1);
    assert_eq!(batch.skipped[0].id, Some(4));

    let evaluation = Evaluator::default().evaluate(&batch.records);
    let reporter = Reporter::new(&evaluation, &batch.skipped);

    let dir = tempfile::tempdir().unwrap();
    let sink = ReportSink::new(dir.path().join("report.json"));
    sink.write(&reporter.to_json().unwrap()).unwrap();

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(sink.path()).unwrap()).unwrap();
    assert_eq!(written["summary"]["total_claims"], 3);
    assert_eq!(written["summary"]["skipped_records"], 1);
    assert_eq!(written["summary"]["swap_count"], 1);
    assert_eq!(written["skipped"][0]["line"], 4);
}

#[test]
fn test_custom_schema() {
    let schema = ValidationSchema::from_json(
        r#"{"version": 1, "fields": [
            {"extracted": "patente", "ground_truth": "dominio"},
            {"extracted": "auto_a", "ground_truth": "auto_a", "policy": "vehicle"},
            {"extracted": "auto_b", "ground_truth": "auto_b", "policy": "vehicle"}
        ]}"#,
    )
    .unwrap();

    let batch = vec![record(json!({
        "id": 1,
        "ground_truth": {"dominio": "AB-123-CD", "auto_a": "Jeep Renegade", "auto_b": "Nissan Kicks"},
        "extracted_data": {"patente": "ab123cd", "auto_a": "Nissan Kicks", "auto_b": "Nissan Kicks"}
    }))];

    let evaluation = Evaluator::new(schema).unwrap().evaluate(&batch);
    assert_eq!(evaluation.metrics.accuracy("patente"), 1.0);
    assert_eq!(evaluation.metrics.accuracy("auto_a"), 0.0);
    assert_eq!(evaluation.metrics.accuracy("auto_b"), 1.0);
    assert_eq!(evaluation.metrics.swap_count(), 1);
}
