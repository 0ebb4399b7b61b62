use super::{TemplateCategory, TemplateEntry};

const BOLLINGER_BANDS: &str = r#"//@version=5
indicator("Bollinger Bands", shorttitle="BB", overlay=true)

// Inputs
length = input.int(20, title="Length", minval=1)
src = input.source(close, title="Source")
mult = input.float(2.0, title="StdDev Multiplier", minval=0.001, maxval=50)

basis = ta.sma(src, length)
dev = mult * ta.stdev(src, length)
upper = basis + dev
lower = basis - dev

plot(basis, title="Basis", color=color.orange)
p1 = plot(upper, title="Upper", color=color.blue)
p2 = plot(lower, title="Lower", color=color.blue)
fill(p1, p2, title="Background", color=color.new(color.blue, 90))
"#;

const RSI: &str = r#"//@version=5
indicator("Relative Strength Index", shorttitle="RSI", overlay=false)

// Inputs
length = input.int(14, title="RSI Length", minval=1)
src = input.source(close, title="Source")
overbought = input.int(70, title="Overbought Level")
oversold = input.int(30, title="Oversold Level")

rsi = ta.rsi(src, length)

plot(rsi, title="RSI", color=color.purple)
hline(overbought, "Overbought", color=color.red)
hline(50, "Middle", color=color.gray)
hline(oversold, "Oversold", color=color.green)
"#;

const MA_RIBBON: &str = r#"//@version=5
indicator("Moving Average Ribbon", shorttitle="MA Ribbon", overlay=true)

// Inputs
src = input.source(close, title="Source")
len1 = input.int(20, title="MA #1 Length", minval=1)
len2 = input.int(50, title="MA #2 Length", minval=1)
len3 = input.int(100, title="MA #3 Length", minval=1)
len4 = input.int(200, title="MA #4 Length", minval=1)

plot(ta.ema(src, len1), title="MA #1", color=color.new(color.yellow, 0))
plot(ta.ema(src, len2), title="MA #2", color=color.new(color.orange, 0))
plot(ta.ema(src, len3), title="MA #3", color=color.new(color.red, 0))
plot(ta.ema(src, len4), title="MA #4", color=color.new(color.maroon, 0))
"#;

const MOVING_AVERAGE: &str = r#"//@version=5
indicator("Moving Average", shorttitle="MA", overlay=true)

// Inputs
length = input.int(20, title="Length", minval=1)
src = input.source(close, title="Source")
maType = input.string("SMA", title="MA Type", options=["SMA", "EMA", "WMA"])

ma = switch maType
    "EMA" => ta.ema(src, length)
    "WMA" => ta.wma(src, length)
    => ta.sma(src, length)

plot(ma, title="MA", color=color.blue, linewidth=2)
"#;

const MACD: &str = r#"//@version=5
indicator("MACD", shorttitle="MACD", overlay=false)

// Inputs
fastLength = input.int(12, title="Fast Length", minval=1)
slowLength = input.int(26, title="Slow Length", minval=1)
signalLength = input.int(9, title="Signal Smoothing", minval=1)
src = input.source(close, title="Source")

[macdLine, signalLine, histogram] = ta.macd(src, fastLength, slowLength, signalLength)

plot(histogram, title="Histogram", style=plot.style_columns, color=histogram >= 0 ? color.green : color.red)
plot(macdLine, title="MACD", color=color.blue)
plot(signalLine, title="Signal", color=color.orange)
hline(0, "Zero Line", color=color.gray)
"#;

const VWAP: &str = r#"//@version=5
indicator("Volume Weighted Average Price", shorttitle="VWAP", overlay=true)

// Inputs
src = input.source(hlc3, title="Source")
showBands = input.bool(true, title="Show Bands")
bandMult = input.float(1.0, title="Band Multiplier", minval=0.1, step=0.1)

[vwapValue, upperBand, lowerBand] = ta.vwap(src, timeframe.change("D"), bandMult)

plot(vwapValue, title="VWAP", color=color.blue, linewidth=2)
plot(showBands ? upperBand : na, title="Upper Band", color=color.green)
plot(showBands ? lowerBand : na, title="Lower Band", color=color.green)
"#;

const BASIC_INDICATOR: &str = r#"//@version=5
indicator("My Indicator", overlay=false)

// Inputs
length = input.int(14, title="Length", minval=1)
src = input.source(close, title="Source")

value = ta.sma(src, length)

plot(value, title="Value", color=color.blue)
"#;

pub(super) fn entries() -> Vec<TemplateEntry> {
    vec![
        TemplateEntry {
            category: TemplateCategory::Indicator,
            canonical_name: "Bollinger Bands",
            aliases: &["bb", "bollinger", "bands"],
            body: BOLLINGER_BANDS,
        },
        TemplateEntry {
            category: TemplateCategory::Indicator,
            canonical_name: "Relative Strength Index",
            aliases: &["rsi"],
            body: RSI,
        },
        TemplateEntry {
            category: TemplateCategory::Indicator,
            canonical_name: "Moving Average Ribbon",
            aliases: &["ma ribbon", "ema ribbon", "ribbon"],
            body: MA_RIBBON,
        },
        TemplateEntry {
            category: TemplateCategory::Indicator,
            canonical_name: "Moving Average",
            aliases: &["ma", "sma", "ema", "wma"],
            body: MOVING_AVERAGE,
        },
        TemplateEntry {
            category: TemplateCategory::Indicator,
            canonical_name: "MACD",
            aliases: &["moving average convergence divergence", "macd histogram"],
            body: MACD,
        },
        TemplateEntry {
            category: TemplateCategory::Indicator,
            canonical_name: "Volume Weighted Average Price",
            aliases: &["vwap"],
            body: VWAP,
        },
    ]
}

pub(super) fn fallback() -> TemplateEntry {
    TemplateEntry {
        category: TemplateCategory::Indicator,
        canonical_name: "Basic Indicator",
        aliases: &[],
        body: BASIC_INDICATOR,
    }
}
