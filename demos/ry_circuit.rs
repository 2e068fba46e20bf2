use autogate::{ circuit::Circuit, gates };

// A two-qubit entangler: Hadamards into a CZ sandwiched by counter-rotating
// Ry(±t) layers, printed as an ASCII diagram and as its exact symbolic
// unitary.
fn main() -> anyhow::Result<()> {
    let mut circuit = Circuit::new();
    circuit.add_gate(0, [0], gates::h())?;
    circuit.add_gate(0, [1], gates::h())?;
    circuit.add_gate(1, [0, 1], gates::cz())?;
    circuit.add_gate(2, [0], gates::ry('t'))?;
    circuit.add_gate(2, [1], gates::ry('u'))?;
    circuit.add_gate(3, [0, 1], gates::cz())?;
    circuit.add_gate(4, [0], gates::h())?;
    circuit.add_gate(4, [1], gates::h())?;
    println!("{}", circuit);

    let u = circuit.matrix().sieved(None);
    println!("{}", u);

    Ok(())
}
