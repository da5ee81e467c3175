//! Basic usage example for the doegen library.
//!
//! This example builds a few designs for a three-factor process and
//! prints both the coded and the decoded matrices.

use doegen::construct::{Alpha, Design, Face, FractionalFactorial};
use doegen::{
    box_behnken, decode, frac_fact_res, full_fact, sukharev, DesignBuilder, DesignKind, FactorSpec,
};

fn main() {
    println!("doegen - Basic Usage Example\n");

    let spec = FactorSpec::new(vec![
        ("Pressure", vec![40.0, 55.0, 70.0]),
        ("Temperature", vec![290.0, 350.0]),
        ("Flow rate", vec![0.2, 0.4]),
    ])
    .expect("Invalid factor specification");

    println!("Factors:");
    print!("{spec}");
    println!();

    // Every combination of the supplied levels
    let full = full_fact(&spec).expect("Failed to build full factorial");
    println!("Full factorial ({} runs):", full.runs());
    println!("{full}");

    // Half fraction from a generator, decoded onto the extremes
    let half = FractionalFactorial::parse("a b ab").expect("Invalid generator");
    let coded = half.build().expect("Failed to build fraction");
    println!("Generator 'a b ab' (resolution {:?}):", coded.resolution());
    println!("{coded}");
    println!("{}", decode(&coded, &spec).expect("Failed to decode"));

    // Three factors cannot carry a resolution-3 fraction smaller than 2^3
    match frac_fact_res(&spec, None) {
        Ok(design) => println!("Resolution search, {} runs:\n{design}", design.runs()),
        Err(err) => println!("Resolution search: {err}\n"),
    }

    // Response-surface designs
    let bb = box_behnken(&spec).expect("Failed to build Box-Behnken");
    println!("Box-Behnken ({} runs):", bb.runs());
    println!("{bb}");

    let ccd = DesignBuilder::new(DesignKind::CentralComposite)
        .center(&[1, 1])
        .alpha(Alpha::Rotatable)
        .face(Face::Inscribed)
        .build(&spec)
        .expect("Failed to build central composite");
    println!("Inscribed rotatable central composite ({} runs):", ccd.runs());
    println!("{}", ccd.rounded(3));

    // Space-filling samples; a seed makes the random draw repeatable
    let grid = sukharev(&spec, None).expect("Failed to build Sukharev grid");
    println!("Sukharev grid ({} runs):", grid.runs());
    println!("{}", grid.rounded(3));

    let lhs = DesignBuilder::new(DesignKind::SpaceFillingLatinHypercube)
        .samples(6)
        .seed(42)
        .build(&spec)
        .expect("Failed to build Latin hypercube");
    println!("Maximin Latin hypercube ({} runs):", lhs.runs());
    println!("{}", lhs.rounded(3));
}
