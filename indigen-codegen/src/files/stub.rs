//! Scaffolding blocks for per-indicator source files.
//!
//! A stub is a sequence of blocks separated by one blank line: the include
//! list, the base block (start + compute), then one block per declared
//! capability. Every body carries `#error` markers so an unedited stub does
//! not compile.

use indigen_manifest::{Capabilities, Capability, Indicator};

use crate::{
    Dialect,
    builder::CodeBuilder,
    declarations::{Operation, declaration, index_constant, symbol},
};

/// Substring whose presence marks `capability` as already scaffolded.
pub fn characteristic_symbol(name: &str, capability: Capability) -> String {
    match capability {
        Capability::Reference => symbol(name, Operation::ReferenceCompute),
        // Prefix of all three streaming entry points
        Capability::Streaming => format!("{}_stream", symbol(name, Operation::Compute)),
    }
}

fn unpack_inputs(indicator: &Indicator) -> Vec<String> {
    indicator
        .inputs
        .iter()
        .enumerate()
        .map(|(i, n)| format!("TI_REAL const *const {} = inputs[{}];", n, i))
        .collect()
}

fn unpack_options(indicator: &Indicator) -> Vec<String> {
    indicator
        .options
        .iter()
        .enumerate()
        .map(|(i, n)| format!("const TI_REAL {} = options[{}];", n, i))
        .collect()
}

fn unpack_outputs(indicator: &Indicator) -> Vec<String> {
    indicator
        .outputs
        .iter()
        .enumerate()
        .map(|(i, n)| format!("TI_REAL *{} = outputs[{}];", n, i))
        .collect()
}

/// Emit `lines` followed by a blank line, or nothing when `lines` is empty.
fn paragraph(builder: CodeBuilder, lines: Vec<String>) -> CodeBuilder {
    let any = !lines.is_empty();
    builder.lines(lines).when(any, |b| b.blank())
}

/// Lines unpacking inputs, options and outputs into named locals.
fn unpack_all(indicator: &Indicator) -> Vec<String> {
    let mut lines = unpack_inputs(indicator);
    lines.extend(unpack_options(indicator));
    lines.extend(unpack_outputs(indicator));
    lines
}

pub fn includes(dialect: Dialect) -> String {
    let builder = CodeBuilder::c().lines([
        "#include \"../indicators.h\"",
        "#include \"../utils/log.h\"",
        "#include \"../utils/minmax.h\"",
    ]);

    let builder = match dialect {
        Dialect::Legacy => builder.line("#include \"../utils/localbuffer.h\""),
        Dialect::Modern => builder
            .line("#include \"../utils/ringbuf.hh\"")
            .blank()
            .line("#include <new>")
            .line("#include <exception>"),
    };
    builder.build()
}

/// Start and compute. Always present.
pub fn base_block(indicator: &Indicator, dialect: Dialect) -> String {
    let name = indicator.name.as_str();
    let start = CodeBuilder::c().block(&format!("{} {{", declaration(name, Operation::Start)), |b| {
        paragraph(b, unpack_options(indicator))
            .error_marker("return how shorter will the output be than the input")
    });

    let compute = declaration(name, Operation::Compute);
    let body = |b: CodeBuilder| {
        paragraph(b, unpack_all(indicator))
            .error_marker("don't forget to validate options")
            .blank()
            .error_marker("vectorized implementation goes here")
            .blank()
            .line("return TI_OKAY;")
    };

    let builder = match dialect {
        Dialect::Legacy => start.blank().block(&format!("{} {{", compute), body),
        Dialect::Modern => start
            .blank()
            .block_with_close(&format!("{} try {{", compute), "} catch (std::bad_alloc& e) {", body)
            .indent()
            .line("return TI_OUT_OF_MEMORY;")
            .dedent()
            .line("}"),
    };
    builder.build()
}

/// The reference implementation. Same in both dialects.
pub fn reference_block(indicator: &Indicator) -> String {
    let decl = declaration(&indicator.name, Operation::ReferenceCompute);
    CodeBuilder::c()
        .block(&format!("{} {{", decl), |b| {
            paragraph(b, unpack_all(indicator))
                .error_marker("don't forget to validate options")
                .blank()
                .error_marker("obviously correct implementation goes here")
                .blank()
                .line("return TI_OKAY;")
        })
        .build()
}

/// Stream state struct plus the `new`/`free`/`run` triple.
pub fn streaming_block(indicator: &Indicator, dialect: Dialect) -> String {
    let name = indicator.name.as_str();
    let options = &indicator.options;

    let state = CodeBuilder::c()
        .block_with_close("struct ti_stream {", "};", |b| {
            b.line("int index;")
                .line("int progress;")
                .blank()
                .block_with_close("struct {", "} options;", |b| {
                    b.each(options, |b, opt| b.line(&format!("TI_REAL {};", opt)))
                })
                .blank()
                .block_with_close("struct {", "} state;", |b| b.blank())
                .blank()
                .block_with_close("struct {", "} constants;", |b| b.blank())
                .when(dialect == Dialect::Legacy, |b| {
                    b.blank().line("BUFFERS(").blank().line(")")
                })
        })
        .blank();

    let stream_new = state.block(&format!("{} {{", declaration(name, Operation::StreamNew)), |b| {
        let b = paragraph(b, unpack_options(indicator))
            .error_marker("don't forget to validate options")
            .blank();

        let b = match dialect {
            Dialect::Legacy => b.line("*stream = calloc(1, sizeof(**stream));"),
            Dialect::Modern => b.line("*stream = new(std::nothrow) ti_stream();"),
        };

        let b = b
            .line("if (!*stream) { return TI_OUT_OF_MEMORY; }")
            .blank()
            .line(&format!("(*stream)->index = {};", index_constant(name)))
            .line(&format!(
                "(*stream)->progress = -{}(options);",
                symbol(name, Operation::Start)
            ))
            .each(options, |b, opt| {
                b.line(&format!("(*stream)->options.{0} = {0};", opt))
            })
            .blank();

        let b = match dialect {
            Dialect::Legacy => b
                .error_marker("don't forget to initialize buffers")
                .blank()
                .line("ti_stream *grown = realloc(*stream, sizeof(**stream) + sizeof(TI_REAL) * BUFFERS_SIZE(*stream));")
                .line("if (!grown) { free(*stream); *stream = 0; return TI_OUT_OF_MEMORY; }")
                .line("*stream = grown;"),
            Dialect::Modern => b
                .block_with_close("try {", "} catch (std::bad_alloc& e) {", |b| {
                    b.error_marker("don't forget to initialize ringbuffers and any other storage")
                })
                .indent()
                .line("delete *stream;")
                .line("*stream = 0;")
                .line("return TI_OUT_OF_MEMORY;")
                .dedent()
                .line("}"),
        };

        b.blank().line("return TI_OKAY;")
    });

    let stream_free = stream_new
        .blank()
        .block(&format!("{} {{", declaration(name, Operation::StreamFree)), |b| match dialect {
            Dialect::Legacy => b.line("free(stream);"),
            Dialect::Modern => b.line("delete stream;"),
        });

    stream_free
        .blank()
        .block(&format!("{} {{", declaration(name, Operation::StreamRun)), |b| {
            b.lines(unpack_inputs(indicator))
                .lines(unpack_outputs(indicator))
                .line("int progress = stream->progress;")
                .each(options, |b, opt| {
                    b.line(&format!("const TI_REAL {0} = stream->options.{0};", opt))
                })
                .blank()
                .line("int i = 0;")
                .error_marker("streaming implementation goes here")
                .blank()
                .line("stream->progress = progress;")
                .error_marker("be sure to save all the state")
                .blank()
                .line("return TI_OKAY;")
        })
        .build()
}

/// Block scaffolding `capability` for `indicator`.
pub fn capability_block(indicator: &Indicator, capability: Capability, dialect: Dialect) -> String {
    match capability {
        Capability::Reference => reference_block(indicator),
        Capability::Streaming => streaming_block(indicator, dialect),
    }
}

/// Blocks for `capabilities`, in canonical order, separated by blank lines.
pub fn capability_blocks(indicator: &Indicator, capabilities: Capabilities, dialect: Dialect) -> String {
    capabilities
        .iter()
        .map(|c| capability_block(indicator, c, dialect))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete scaffolding for a stub that does not exist yet.
pub fn fresh_stub(indicator: &Indicator, dialect: Dialect) -> String {
    let mut blocks = vec![includes(dialect), base_block(indicator, dialect)];
    blocks.extend(
        indicator
            .capabilities
            .iter()
            .map(|c| capability_block(indicator, c, dialect)),
    );
    blocks.join("\n")
}

#[cfg(test)]
mod tests {
    use indigen_manifest::Category;

    use super::*;

    fn ema() -> Indicator {
        Indicator::new("ema", "Exponential Moving Average", Category::Overlay)
            .inputs(["real"])
            .options(["period"])
            .outputs(["ema"])
            .capability(Capability::Reference)
            .capability(Capability::Streaming)
    }

    fn abs() -> Indicator {
        Indicator::new("abs", "Vector Absolute Value", Category::Simple)
            .inputs(["real"])
            .outputs(["abs"])
    }

    #[test]
    fn test_characteristic_symbols() {
        assert_eq!(characteristic_symbol("ema", Capability::Reference), "ti_ema_ref");
        assert_eq!(characteristic_symbol("ema", Capability::Streaming), "ti_ema_stream");
    }

    #[test]
    fn test_base_block_has_no_capability_symbols() {
        let ind = ema();
        for dialect in Dialect::ALL {
            let base = format!("{}\n{}", includes(dialect), base_block(&ind, dialect));
            for cap in Capability::ALL {
                assert!(!base.contains(&characteristic_symbol("ema", cap)));
            }
        }
    }

    #[test]
    fn test_reference_block_lacks_stream_symbol() {
        let block = reference_block(&ema());
        assert!(block.contains("ti_ema_ref"));
        assert!(!block.contains("ti_ema_stream"));
    }

    #[test]
    fn test_modern_base_block() {
        let block = base_block(&ema(), Dialect::Modern);
        assert_eq!(
            block,
            "int ti_ema_start(TI_REAL const *options) {
    const TI_REAL period = options[0];

    #error \"return how shorter will the output be than the input\"
}

int ti_ema(int size, TI_REAL const *const *inputs, TI_REAL const *options, TI_REAL *const *outputs) try {
    TI_REAL const *const real = inputs[0];
    const TI_REAL period = options[0];
    TI_REAL *ema = outputs[0];

    #error \"don't forget to validate options\"

    #error \"vectorized implementation goes here\"

    return TI_OKAY;
} catch (std::bad_alloc& e) {
    return TI_OUT_OF_MEMORY;
}
"
        );
    }

    #[test]
    fn test_legacy_base_block_has_no_try() {
        let block = base_block(&ema(), Dialect::Legacy);
        assert!(!block.contains("try"));
        assert!(!block.contains("catch"));
        assert!(block.ends_with("    return TI_OKAY;\n}\n"));
    }

    #[test]
    fn test_start_without_options() {
        let block = base_block(&abs(), Dialect::Modern);
        assert!(block.starts_with(
            "int ti_abs_start(TI_REAL const *options) {\n    #error \"return how shorter will the output be than the input\"\n}\n"
        ));
    }

    #[test]
    fn test_includes_per_dialect() {
        let legacy = includes(Dialect::Legacy);
        let modern = includes(Dialect::Modern);
        assert!(legacy.contains("localbuffer.h"));
        assert!(!legacy.contains("<new>"));
        assert!(modern.contains("ringbuf.hh"));
        assert!(modern.contains("#include <new>\n#include <exception>\n"));
    }

    #[test]
    fn test_streaming_block_idioms() {
        let legacy = streaming_block(&ema(), Dialect::Legacy);
        let modern = streaming_block(&ema(), Dialect::Modern);

        assert!(legacy.contains("calloc(1, sizeof(**stream))"));
        assert!(legacy.contains("    BUFFERS(\n\n    )\n};"));
        assert!(legacy.contains("free(stream);"));
        assert!(!legacy.contains("new(std::nothrow)"));

        assert!(modern.contains("*stream = new(std::nothrow) ti_stream();"));
        assert!(modern.contains("delete stream;"));
        assert!(!modern.contains("BUFFERS("));
        assert!(!modern.contains("calloc"));

        for block in [&legacy, &modern] {
            assert!(block.contains("(*stream)->index = TI_INDICATOR_EMA_INDEX;"));
            assert!(block.contains("(*stream)->progress = -ti_ema_start(options);"));
            assert!(block.contains("(*stream)->options.period = period;"));
            assert!(block.contains("        TI_REAL period;\n    } options;"));
            assert!(block.contains("const TI_REAL period = stream->options.period;"));
        }
    }

    #[test]
    fn test_fresh_stub_carries_all_markers() {
        let stub = fresh_stub(&ema(), Dialect::Modern);
        for decl in [
            "int ti_ema_start(",
            "int ti_ema(",
            "int DONTOPTIMIZE ti_ema_ref(",
            "int ti_ema_stream_new(",
            "void ti_ema_stream_free(",
            "int ti_ema_stream_run(",
        ] {
            assert!(stub.contains(decl), "missing {}", decl);
        }
        for marker in [
            "#error \"return how shorter will the output be than the input\"",
            "#error \"vectorized implementation goes here\"",
            "#error \"obviously correct implementation goes here\"",
            "#error \"streaming implementation goes here\"",
            "#error \"be sure to save all the state\"",
        ] {
            assert!(stub.contains(marker), "missing {}", marker);
        }
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let ind = ema();
        let stub = fresh_stub(&ind, Dialect::Legacy);
        let expected = format!(
            "{}\n{}\n{}\n{}",
            includes(Dialect::Legacy),
            base_block(&ind, Dialect::Legacy),
            reference_block(&ind),
            streaming_block(&ind, Dialect::Legacy)
        );
        assert_eq!(stub, expected);
        assert!(stub.ends_with("}\n"));
        assert!(!stub.contains("\n\n\n"));
    }
}
