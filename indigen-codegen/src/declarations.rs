//! C declarations for the per-indicator entry points.
//!
//! The header, the metadata table and the stubs all spell these signatures;
//! they are produced here so the three never drift apart.

use indigen_core::to_upper_snake_case;

/// Prefix shared by every exported symbol.
pub const SYMBOL_PREFIX: &str = "ti_";

/// One of the six entry points an indicator may export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `ti_<name>_start`: how much shorter the output is than the input
    Start,
    /// `ti_<name>`: the vectorized implementation
    Compute,
    /// `ti_<name>_ref`: slow reference implementation
    ReferenceCompute,
    /// `ti_<name>_stream_new`
    StreamNew,
    /// `ti_<name>_stream_run`
    StreamRun,
    /// `ti_<name>_stream_free`
    StreamFree,
}

impl Operation {
    /// Entry points every indicator exports.
    pub const BASE: [Operation; 2] = [Operation::Start, Operation::Compute];
    /// Entry points of the streaming capability, in declaration order.
    pub const STREAMING: [Operation; 3] = [
        Operation::StreamNew,
        Operation::StreamRun,
        Operation::StreamFree,
    ];

    /// Suffix appended to `ti_<name>` for this entry point.
    pub fn suffix(&self) -> &'static str {
        match self {
            Operation::Start => "_start",
            Operation::Compute => "",
            Operation::ReferenceCompute => "_ref",
            Operation::StreamNew => "_stream_new",
            Operation::StreamRun => "_stream_run",
            Operation::StreamFree => "_stream_free",
        }
    }
}

/// Exported symbol name of `operation` for the indicator `name`.
pub fn symbol(name: &str, operation: Operation) -> String {
    format!("{}{}{}", SYMBOL_PREFIX, name, operation.suffix())
}

/// Full C prototype (without a trailing `;`) of `operation` for `name`.
pub fn declaration(name: &str, operation: Operation) -> String {
    let symbol = symbol(name, operation);
    match operation {
        Operation::Start => format!("int {}(TI_REAL const *options)", symbol),
        Operation::Compute => format!(
            "int {}(int size, TI_REAL const *const *inputs, TI_REAL const *options, TI_REAL *const *outputs)",
            symbol
        ),
        Operation::ReferenceCompute => format!(
            "int DONTOPTIMIZE {}(int size, TI_REAL const *const *inputs, TI_REAL const *options, TI_REAL *const *outputs)",
            symbol
        ),
        Operation::StreamNew => format!(
            "int {}(TI_REAL const *options, ti_stream **stream)",
            symbol
        ),
        Operation::StreamRun => format!(
            "int {}(ti_stream *stream, int size, TI_REAL const *const *inputs, TI_REAL *const *outputs)",
            symbol
        ),
        Operation::StreamFree => format!("void {}(ti_stream *stream)", symbol),
    }
}

/// Name of the enumerated constant holding the indicator's position in the
/// sorted metadata table, e.g. `TI_INDICATOR_SMA_INDEX`.
pub fn index_constant(name: &str) -> String {
    format!("TI_INDICATOR_{}_INDEX", to_upper_snake_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_declaration() {
        assert_eq!(
            declaration("sma", Operation::Start),
            "int ti_sma_start(TI_REAL const *options)"
        );
    }

    #[test]
    fn test_compute_and_reference_share_parameters() {
        let compute = declaration("sma", Operation::Compute);
        let reference = declaration("sma", Operation::ReferenceCompute);

        assert_eq!(
            compute,
            "int ti_sma(int size, TI_REAL const *const *inputs, TI_REAL const *options, TI_REAL *const *outputs)"
        );
        assert!(reference.starts_with("int DONTOPTIMIZE ti_sma_ref("));
        assert_eq!(
            compute.split_once('(').map(|(_, p)| p),
            reference.split_once('(').map(|(_, p)| p)
        );
    }

    #[test]
    fn test_stream_declarations() {
        assert_eq!(
            declaration("ema", Operation::StreamNew),
            "int ti_ema_stream_new(TI_REAL const *options, ti_stream **stream)"
        );
        assert_eq!(
            declaration("ema", Operation::StreamRun),
            "int ti_ema_stream_run(ti_stream *stream, int size, TI_REAL const *const *inputs, TI_REAL *const *outputs)"
        );
        assert_eq!(
            declaration("ema", Operation::StreamFree),
            "void ti_ema_stream_free(ti_stream *stream)"
        );
    }

    #[test]
    fn test_symbols() {
        assert_eq!(symbol("stoch_rsi", Operation::Compute), "ti_stoch_rsi");
        assert_eq!(symbol("sma", Operation::ReferenceCompute), "ti_sma_ref");
    }

    #[test]
    fn test_index_constant() {
        assert_eq!(index_constant("sma"), "TI_INDICATOR_SMA_INDEX");
        assert_eq!(index_constant("stoch_rsi"), "TI_INDICATOR_STOCH_RSI_INDEX");
    }
}
