use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gnb_classifiers::config::ResampleConfig;
use gnb_classifiers::data_handling::Dataset;
use gnb_classifiers::math::{Array1, Array2};
use gnb_classifiers::models::{Estimator, GaussianNb};
use gnb_classifiers::report::mean_class_posteriors;
use gnb_classifiers::resampler::Resampler;
use gnb_classifiers::split::train_test_split;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 150 samples, 4 features, 3 classes with some overlap between 1 and 2
    let centers = [
        [5.0, 3.4, 1.5, 0.2],
        [5.9, 2.8, 4.3, 1.3],
        [6.6, 3.0, 5.5, 2.0],
    ];
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = Vec::with_capacity(150 * 4);
    let mut labels = Vec::with_capacity(150);
    for (label, center) in centers.iter().enumerate() {
        for _ in 0..50 {
            for &c in center {
                data.push(c + rng.gen_range(-0.8..0.8));
            }
            labels.push(label as i32);
        }
    }
    let dataset = Dataset::new(
        Array2::from_shape_vec((150, 4), data)?,
        Array1::from_vec(labels),
    )?;

    println!("Synthetic X shape: {:?}", dataset.x().shape());

    let estimator = GaussianNb::default();
    let summary = Resampler::new(ResampleConfig::default()).run(&estimator, &dataset)?;
    println!("{}", summary);

    let (train, test) = train_test_split(&dataset, 0.2, Some(42))?;
    let model = estimator.fit(train.x(), train.y().as_slice())?;
    let prediction = model.predict_with_posteriors(test.x())?;
    for (label, mean) in mean_class_posteriors(&model, &prediction.posteriors)? {
        println!("Mean posterior for class {}: {:.3e}", label, mean);
    }

    Ok(())
}
