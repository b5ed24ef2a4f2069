//! QASM3 emitter for serializing circuits.

use alsvid_ir::{Circuit, InstructionKind, ParamExpr};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{EmitError, EmitResult};

/// Emit a circuit as QASM3 source code.
///
/// Free parameters become `input float[64]` declarations, so a template
/// serializes to a program that takes its angles as runtime inputs.
pub fn emit(circuit: &Circuit) -> EmitResult<String> {
    let mut emitter = Emitter::new(circuit)?;
    emitter.emit_circuit(circuit)
}

/// QASM3 emitter.
struct Emitter {
    output: String,
    /// Circuit parameter name → sanitized QASM3 identifier.
    symbols: FxHashMap<String, String>,
    /// Input declarations, in parameter order.
    inputs: Vec<String>,
}

impl Emitter {
    fn new(circuit: &Circuit) -> EmitResult<Self> {
        let mut symbols = FxHashMap::default();
        let mut inputs = Vec::new();
        let mut used = FxHashSet::default();

        for name in circuit.parameters() {
            let base = sanitize_identifier(&name)
                .ok_or_else(|| EmitError::InvalidIdentifier {
                    original: name.clone(),
                })?;
            // Disambiguate names that sanitize to the same identifier.
            let mut ident = base.clone();
            let mut suffix = 1;
            while !used.insert(ident.clone()) {
                suffix += 1;
                ident = format!("{base}_{suffix}");
            }
            inputs.push(ident.clone());
            symbols.insert(name, ident);
        }

        Ok(Self {
            output: String::new(),
            symbols,
            inputs,
        })
    }

    fn emit_circuit(&mut self, circuit: &Circuit) -> EmitResult<String> {
        // Version
        self.writeln("OPENQASM 3.0;");
        self.writeln("");

        // Free parameters as runtime inputs
        let inputs = std::mem::take(&mut self.inputs);
        for ident in &inputs {
            self.writeln(&format!("input float[64] {ident};"));
        }
        if !inputs.is_empty() {
            self.writeln("");
        }

        // Register declarations
        let num_qubits = circuit.num_qubits();
        if num_qubits > 0 {
            self.writeln(&format!("qubit[{num_qubits}] q;"));
        }
        let num_clbits = circuit.num_clbits();
        if num_clbits > 0 {
            self.writeln(&format!("bit[{num_clbits}] c;"));
        }
        if num_qubits > 0 || num_clbits > 0 {
            self.writeln("");
        }

        // Instructions
        for instruction in circuit.instructions() {
            let qubits = self.emit_qubits(&instruction.qubits);
            match &instruction.kind {
                InstructionKind::Gate(gate) => {
                    let params: Vec<String> = gate
                        .parameters()
                        .iter()
                        .map(|p| self.emit_param(p))
                        .collect();
                    if params.is_empty() {
                        self.writeln(&format!("{} {qubits};", gate.name()));
                    } else {
                        self.writeln(&format!(
                            "{}({}) {qubits};",
                            gate.name(),
                            params.join(", ")
                        ));
                    }
                }
                InstructionKind::Barrier => {
                    self.writeln(&format!("barrier {qubits};"));
                }
                InstructionKind::Measure => {
                    for (q, c) in instruction.qubits.iter().zip(instruction.clbits.iter()) {
                        self.writeln(&format!("c[{}] = measure q[{}];", c.0, q.0));
                    }
                }
            }
        }

        Ok(self.output.clone())
    }

    fn emit_param(&self, param: &ParamExpr) -> String {
        match param {
            ParamExpr::Const(v) => {
                // Fold common fractions of pi into readable form.
                let pi = std::f64::consts::PI;
                if (*v - pi).abs() < 1e-10 {
                    "pi".into()
                } else if (*v + pi).abs() < 1e-10 {
                    "-pi".into()
                } else if (*v - pi / 2.0).abs() < 1e-10 {
                    "pi/2".into()
                } else if (*v - pi / 4.0).abs() < 1e-10 {
                    "pi/4".into()
                } else if (*v + pi / 2.0).abs() < 1e-10 {
                    "-pi/2".into()
                } else if (*v + pi / 4.0).abs() < 1e-10 {
                    "-pi/4".into()
                } else {
                    format!("{v:.6}")
                }
            }
            ParamExpr::Symbol(name) => match self.symbols.get(name) {
                Some(ident) => ident.clone(),
                None => name.clone(),
            },
            ParamExpr::Pi => "pi".into(),
            ParamExpr::Neg(e) => format!("-({})", self.emit_param(e)),
            ParamExpr::Add(a, b) => {
                format!("({} + {})", self.emit_param(a), self.emit_param(b))
            }
            ParamExpr::Sub(a, b) => {
                format!("({} - {})", self.emit_param(a), self.emit_param(b))
            }
            ParamExpr::Mul(a, b) => {
                format!("({} * {})", self.emit_param(a), self.emit_param(b))
            }
            ParamExpr::Div(a, b) => {
                format!("({} / {})", self.emit_param(a), self.emit_param(b))
            }
        }
    }

    fn emit_qubits(&self, qubits: &[alsvid_ir::QubitId]) -> String {
        qubits
            .iter()
            .map(|q| format!("q[{}]", q.0))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Map a circuit parameter name onto a QASM3 identifier.
///
/// Common Greek prefixes are transliterated, index brackets become
/// underscores, and anything else non-alphanumeric is dropped. Returns
/// `None` when nothing identifier-like remains.
fn sanitize_identifier(name: &str) -> Option<String> {
    let mut ident = String::new();
    for ch in name.chars() {
        match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => ident.push(ch),
            '[' => ident.push('_'),
            ']' => {}
            'θ' => ident.push_str("theta"),
            'φ' | 'ϕ' => ident.push_str("phi"),
            'α' => ident.push_str("alpha"),
            'β' => ident.push_str("beta"),
            'γ' => ident.push_str("gamma"),
            'λ' => ident.push_str("lambda"),
            _ => {}
        }
    }
    if ident.is_empty() {
        return None;
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    Some(ident)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::QubitId;

    #[test]
    fn test_emit_plain_circuit() {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure_all()
            .unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("OPENQASM 3.0;"));
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("bit[2] c;"));
        assert!(qasm.contains("h q[0];"));
        assert!(qasm.contains("cx q[0], q[1];"));
        assert!(qasm.contains("c[0] = measure q[0];"));
        assert!(!qasm.contains("input"));
    }

    #[test]
    fn test_emit_pi_fractions() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.rx(std::f64::consts::PI / 2.0, QubitId(0)).unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("rx(pi/2) q[0];"));
    }

    #[test]
    fn test_emit_free_parameters_as_inputs() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit
            .ry(ParamExpr::symbol("θ[0]"), QubitId(0))
            .unwrap()
            .ry(ParamExpr::symbol("θ[1]"), QubitId(1))
            .unwrap()
            .cz(QubitId(0), QubitId(1))
            .unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("input float[64] theta_0;"));
        assert!(qasm.contains("input float[64] theta_1;"));
        assert!(qasm.contains("ry(theta_0) q[0];"));
        assert!(qasm.contains("cz q[0], q[1];"));
    }

    #[test]
    fn test_emit_barrier() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("barrier q[0], q[1];"));
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("θ[0]").as_deref(), Some("theta_0"));
        assert_eq!(sanitize_identifier("phi[12]").as_deref(), Some("phi_12"));
        assert_eq!(sanitize_identifier("7x").as_deref(), Some("_7x"));
        assert_eq!(sanitize_identifier("∅"), None);
    }

    #[test]
    fn test_invalid_identifier_is_an_error() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.ry(ParamExpr::symbol("∅"), QubitId(0)).unwrap();
        assert!(matches!(
            emit(&circuit).unwrap_err(),
            EmitError::InvalidIdentifier { .. }
        ));
    }
}
