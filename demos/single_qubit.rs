use autogate::{ circuit::Circuit, gates };

// Print the catalogue's single-qubit matrices as exact trigonometric
// polynomials, then the full symbolic unitary of a small circuit.
fn main() -> anyhow::Result<()> {
    for gate in [
        gates::i(), gates::x(), gates::y(), gates::z(), gates::h(),
        gates::ry('a'),
    ] {
        println!("----");
        println!("{}", gate.labels().join(""));
        println!("{}", gate.matrix());
    }

    let mut circuit = Circuit::new();
    circuit.add_gate(0, [0], gates::h())?;
    circuit.add_gate(1, [0], gates::ry('a'))?;
    println!("{}", circuit);
    println!("{}", circuit.matrix());

    Ok(())
}
