//! Dashboard HTML template
//!
//! Contains the main page structure including:
//! - Header with liveness summary and refresh controls
//! - Horizon score tiles with signal badges
//! - Per-provider data cards (spot, sentiment, derivatives, DeFi, macro)
//! - Top protocols table

pub const TEMPLATE: &str = r#"
    <div class="container">
        <header>
            <div>
                <h1>&#8383; Market Pulse</h1>
                <span class="refresh-time" id="refreshTime">Loading...</span>
            </div>
            <div class="header-controls">
                <span class="status-badge status-demo" id="livenessBadge">Loading</span>
                <button class="btn btn-secondary" onclick="refreshAll()" id="refreshBtn">&#8634; Refresh</button>
                <button class="btn btn-primary" onclick="forceRefresh()" id="forceBtn">&#9889; Fetch Now</button>
            </div>
        </header>

        <div class="grid">
            <!-- Horizon Scores -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">Decision Scores</span>
                    <span class="refresh-time" id="scoresTime"></span>
                </div>
                <div class="score-grid">
                    <div class="score-tile">
                        <div class="score-horizon">Day Trading</div>
                        <div class="score-value" id="dayScore">--</div>
                        <div class="score-signal signal-hold" id="daySignal">--</div>
                    </div>
                    <div class="score-tile">
                        <div class="score-horizon">Swing</div>
                        <div class="score-value" id="swingScore">--</div>
                        <div class="score-signal signal-hold" id="swingSignal">--</div>
                    </div>
                    <div class="score-tile">
                        <div class="score-horizon">Long-Term Hold</div>
                        <div class="score-value" id="hodlScore">--</div>
                        <div class="score-signal signal-hold" id="hodlSignal">--</div>
                    </div>
                </div>
            </div>

            <!-- Spot Market -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title"><span class="dot" id="marketDot"></span> Spot Market</span>
                </div>
                <div class="card-value" id="spotPrice">$--</div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">24h Change</div>
                        <div class="metric-value" id="spotChange">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Market Cap</div>
                        <div class="metric-value" id="spotMcap">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">24h Volume</div>
                        <div class="metric-value" id="spotVolume">--</div>
                    </div>
                </div>
            </div>

            <!-- Sentiment -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title"><span class="dot" id="sentimentDot"></span> Fear &amp; Greed</span>
                </div>
                <div class="card-value" id="fearGreed">--</div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">Classification</div>
                        <div class="metric-value" id="fearGreedLabel">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Total Mkt Cap</div>
                        <div class="metric-value" id="totalMcap">--</div>
                    </div>
                </div>
            </div>

            <!-- Derivatives -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title"><span class="dot" id="derivativesDot"></span> Derivatives</span>
                </div>
                <div class="card-value" id="fundingRate">--</div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">Funding Signal</div>
                        <div class="metric-value" id="fundingSignal">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Open Interest</div>
                        <div class="metric-value" id="openInterest">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Accounts Long</div>
                        <div class="metric-value" id="longRatio">--</div>
                    </div>
                </div>
            </div>

            <!-- DeFi -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title"><span class="dot" id="defiDot"></span> DeFi</span>
                </div>
                <div class="card-value" id="tvl">--</div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">TVL 30d</div>
                        <div class="metric-value" id="tvlChange">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Stablecoins</div>
                        <div class="metric-value" id="stableSupply">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Stable 30d</div>
                        <div class="metric-value" id="stableChange">--</div>
                    </div>
                </div>
            </div>

            <!-- Macro -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title"><span class="dot" id="macroDot"></span> Macro (M2)</span>
                </div>
                <div class="card-value" id="m2Supply">--</div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">YoY Change</div>
                        <div class="metric-value" id="m2Change">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Trend</div>
                        <div class="metric-value" id="m2Trend">--</div>
                    </div>
                </div>
            </div>

            <!-- Top Protocols -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">Top Protocols by TVL</span>
                </div>
                <table class="protocols-table">
                    <thead>
                        <tr>
                            <th>#</th>
                            <th>Protocol</th>
                            <th>TVL</th>
                        </tr>
                    </thead>
                    <tbody id="protocolsBody">
                        <tr><td colspan="3" style="text-align: center; color: var(--text-dim);">Loading...</td></tr>
                    </tbody>
                </table>
            </div>
        </div>
    </div>
"#;
