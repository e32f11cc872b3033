use std::{ thread, time::Instant };
use qcircuit_form::{
    client::{ ClientConfig, SimulationClient },
    form::Field,
    gate::GateKind,
    session::Session,
};

fn timeit<F, T>(mut f: F) -> (T, f64)
where F: FnMut() -> T
{
    let t0 = Instant::now();
    let out: T = f();
    (out, (Instant::now() - t0).as_secs_f64())
}

// Build the Bell-state circuit through the form
//
//   ∣0⟩ --H--*--
//            |
//   ∣0⟩ -----X--
//
// and simulate it against a service running on localhost:8000. Pass a
// different base URL as the first argument to point elsewhere.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config =
        match std::env::args().nth(1) {
            Some(url) => ClientConfig::default().with_base_url(url),
            None => ClientConfig::default(),
        };
    let client = SimulationClient::new(config)?;
    match client.ping() {
        Ok(greeting) => println!("service says: {}", greeting),
        Err(err) => println!("service unreachable: {}", err),
    }

    let mut session = Session::new();
    session.form_mut().select(GateKind::H).set_str(Field::Qubit, "0")?;
    session.add_gate();
    session.form_mut()
        .select(GateKind::CNOT)
        .set_str(Field::Control, "0")?
        .set_str(Field::Target, "1")?;
    session.add_gate();
    println!("circuit =\n{}", session.circuit());

    print!("simulate ... ");
    let (lines, t) = timeit(|| session.simulate(&client).lines().join("\n"));
    println!("{:.3e} secs", t);
    println!("result =\n{}", lines);

    // two overlapping submissions: only the later one may land
    let first = session.begin_submit();
    session.form_mut().select(GateKind::Z).set(Field::Qubit, 1);
    session.add_gate();
    let second = session.begin_submit();
    let (out_first, out_second) =
        thread::scope(|s| {
            let a = s.spawn(|| client.submit(&first.circuit));
            let b = s.spawn(|| client.submit(&second.circuit));
            (a.join(), b.join())
        });
    let out_first =
        out_first.map_err(|_| anyhow::anyhow!("submit thread panicked"))?;
    let out_second =
        out_second.map_err(|_| anyhow::anyhow!("submit thread panicked"))?;
    session.finish_submit(second.token, out_second);
    let applied = session.finish_submit(first.token, out_first);
    println!("stale result applied: {}", applied);
    println!("result =\n{}", session.results().lines().join("\n"));

    session.clear();
    println!("after clear: {} gate(s), {} result line(s)",
        session.circuit().len(), session.results().lines().len());
    Ok(())
}
