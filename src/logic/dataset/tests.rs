use super::generator::{archetype_signals, argmax, class_distribution, generate_samples, PatientSampler};
use super::split::stratified_split;
use crate::logic::features::FeatureVector;
use crate::logic::model::{Diagnosis, CLASS_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_generation_is_reproducible() {
    let a = generate_samples(200, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = generate_samples(200, &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);

    let c = generate_samples(200, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_ne!(a, c);
}

#[test]
fn test_continuous_features_clipped() {
    let samples = generate_samples(2000, &mut StdRng::seed_from_u64(1)).unwrap();
    for s in &samples {
        let f = &s.features;
        assert!((36.0..=42.0).contains(&f.temperature));
        assert!((1.0..=14.0).contains(&f.duration_days));
        assert!((20.0..=400.0).contains(&f.platelet_count));
    }
}

#[test]
fn test_all_labels_appear() {
    let samples = generate_samples(3000, &mut StdRng::seed_from_u64(42)).unwrap();
    let counts = class_distribution(&samples);
    assert_eq!(counts.iter().sum::<usize>(), 3000);
    for (label, count) in Diagnosis::ALL.iter().zip(counts.iter()) {
        assert!(*count > 0, "{} never generated", label);
    }
}

#[test]
fn test_argmax_first_declared_wins_ties() {
    assert_eq!(argmax(&[1.0, 1.0, 0.0, 0.0, 0.0]), 0);
    assert_eq!(argmax(&[0.0, 2.0, 2.0, 2.0, 0.0]), 1);
    assert_eq!(argmax(&[0.0, 0.0, 0.0, 3.0, 3.0]), 3);
    assert_eq!(argmax(&[0.0, 0.0, 0.0, 0.0, 0.5]), 4);
}

#[test]
fn test_archetype_signals() {
    let dengue_like = FeatureVector::builder(39.6, 2.0)
        .rash(true)
        .platelet_count(120.0)
        .mosquito_exposure(true)
        .build();
    let s = archetype_signals(&dengue_like);
    assert_eq!(s[Diagnosis::Dengue.index()], 4.0);
    // temp>39.5 + mosquito
    assert_eq!(s[Diagnosis::Malaria.index()], 2.0);
    assert_eq!(s[Diagnosis::Typhoid.index()], 0.0);
    // rash present, temp above 39, no body pain
    assert_eq!(s[Diagnosis::ViralFever.index()], 0.0);
    assert_eq!(s[Diagnosis::Covid.index()], 0.0);

    let covid_like = FeatureVector::builder(38.4, 2.0).breathing_difficulty(true).build();
    assert_eq!(archetype_signals(&covid_like)[Diagnosis::Covid.index()], 5.0);

    // Breathing difficulty without fever above 38 carries no COVID signal
    let afebrile = FeatureVector::builder(38.0, 2.0).breathing_difficulty(true).build();
    assert_eq!(archetype_signals(&afebrile)[Diagnosis::Covid.index()], 0.0);
}

#[test]
fn test_strong_covid_signal_dominates_label() {
    let sampler = PatientSampler::new().unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let v = FeatureVector::builder(38.6, 2.0).breathing_difficulty(true).build();

    let covid = (0..200)
        .filter(|_| sampler.label(&v, &mut rng).unwrap() == Diagnosis::Covid)
        .count();
    assert!(covid > 190, "covid labeled {} / 200", covid);
}

#[test]
fn test_stratified_split_keeps_proportions() {
    let mut rng = StdRng::seed_from_u64(42);
    let samples = generate_samples(1000, &mut rng).unwrap();
    let split = stratified_split(&samples, 0.2, &mut rng);

    assert_eq!(split.train.len() + split.test.len(), 1000);

    let total = class_distribution(&samples);
    let test = class_distribution(&split.test);
    for i in 0..CLASS_COUNT {
        if total[i] >= 2 {
            let expected = (total[i] as f64 * 0.2).round() as usize;
            assert_eq!(test[i], expected.clamp(1, total[i] - 1));
        }
    }
}
