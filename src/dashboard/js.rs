//! Dashboard JavaScript
//!
//! Client-side logic for the decision dashboard:
//! - API calls to fetch snapshot, scores, and status data
//! - UI updates with formatting utilities
//! - Auto-refresh every 60 seconds (matches the worker cron)
//! - Manual refresh and fetch-now buttons

pub const SCRIPT: &str = r#"
// ============================================================================
// Configuration
// ============================================================================
const CONFIG = {
    refreshInterval: 60000,  // 60 seconds
    apiBase: ''
};

const SIGNAL_CLASSES = {
    'AKUMULUJ': 'signal-akumuluj',
    'HOLD+': 'signal-holdplus',
    'HOLD': 'signal-hold',
    'OSTROŻNIE': 'signal-ostroznie',
    'REDUKUJ': 'signal-redukuj'
};

// ============================================================================
// State
// ============================================================================
let lastUpdate = null;

// ============================================================================
// API Functions
// ============================================================================
async function fetchJSON(endpoint) {
    try {
        const res = await fetch(CONFIG.apiBase + endpoint);
        return await res.json();
    } catch (e) {
        console.error(`Error fetching ${endpoint}:`, e);
        return null;
    }
}

// ============================================================================
// Formatting Utilities
// ============================================================================
function formatUSD(value, decimals = 0) {
    if (value == null || isNaN(value)) return '$--';
    return '$' + parseFloat(value).toLocaleString('en-US', {
        minimumFractionDigits: decimals,
        maximumFractionDigits: decimals
    });
}

function formatUSDCompact(value) {
    if (value == null || isNaN(value)) return '$--';
    const abs = Math.abs(value);
    if (abs >= 1e12) return '$' + (value / 1e12).toFixed(2) + 'T';
    if (abs >= 1e9) return '$' + (value / 1e9).toFixed(1) + 'B';
    if (abs >= 1e6) return '$' + (value / 1e6).toFixed(1) + 'M';
    return formatUSD(value);
}

function formatPercent(value, decimals = 2) {
    if (value == null || isNaN(value)) return '--%';
    const sign = value >= 0 ? '+' : '';
    return sign + parseFloat(value).toFixed(decimals) + '%';
}

function changeClass(value) {
    if (value > 0) return 'positive';
    if (value < 0) return 'negative';
    return 'neutral';
}

// ============================================================================
// UI Update Functions
// ============================================================================
function updateTimestamp() {
    lastUpdate = new Date();
    document.getElementById('refreshTime').textContent = 'Updated: ' + lastUpdate.toLocaleTimeString();
}

function setDot(id, status) {
    const dot = document.getElementById(id);
    if (!dot) return;
    dot.className = 'dot dot-' + (status || 'fallback');
}

function updateLivenessBadge(liveness) {
    const badge = document.getElementById('livenessBadge');
    if (!liveness) {
        badge.textContent = 'Demo Data';
        badge.className = 'status-badge status-demo';
        return;
    }

    const statuses = [liveness.market, liveness.derivatives, liveness.defi, liveness.macro_feed];
    if (statuses.every(s => s === 'live')) {
        badge.textContent = 'Live';
        badge.className = 'status-badge status-live';
    } else if (statuses.some(s => s === 'fallback')) {
        badge.textContent = 'Demo Data';
        badge.className = 'status-badge status-demo';
    } else {
        badge.textContent = 'Stale';
        badge.className = 'status-badge status-stale';
    }

    setDot('marketDot', liveness.market);
    setDot('sentimentDot', liveness.market);
    setDot('derivativesDot', liveness.derivatives);
    setDot('defiDot', liveness.defi);
    setDot('macroDot', liveness.macro_feed);
}

function setScore(prefix, score) {
    if (!score) return;
    document.getElementById(prefix + 'Score').textContent = score.value;
    const signalEl = document.getElementById(prefix + 'Signal');
    signalEl.textContent = score.signal;
    signalEl.className = 'score-signal ' + (SIGNAL_CLASSES[score.signal] || 'signal-hold');
}

function updateScores(data) {
    if (!data || !data.scores) return;
    setScore('day', data.scores.day);
    setScore('swing', data.scores.swing);
    setScore('hodl', data.scores.hodl);
    if (data.last_refresh) {
        document.getElementById('scoresTime').textContent =
            'Cycle: ' + new Date(data.last_refresh).toLocaleTimeString();
    }
}

function updateSnapshot(data) {
    if (!data || !data.aggregate) return;
    const agg = data.aggregate;

    const market = agg.market;
    document.getElementById('spotPrice').textContent = formatUSD(market.price_usd);
    const changeEl = document.getElementById('spotChange');
    changeEl.textContent = formatPercent(market.change_24h);
    changeEl.className = 'metric-value ' + changeClass(market.change_24h);
    document.getElementById('spotMcap').textContent = formatUSDCompact(market.market_cap_usd);
    document.getElementById('spotVolume').textContent = formatUSDCompact(market.volume_24h_usd);

    document.getElementById('fearGreed').textContent = market.fear_greed;
    document.getElementById('fearGreedLabel').textContent = market.fear_greed_label;
    document.getElementById('totalMcap').textContent = formatUSDCompact(market.total_market_cap_usd);

    const deriv = agg.derivatives;
    document.getElementById('fundingRate').textContent = formatPercent(deriv.funding_rate_pct, 4);
    document.getElementById('fundingSignal').textContent = deriv.funding_signal;
    document.getElementById('openInterest').textContent =
        parseFloat(deriv.open_interest).toLocaleString('en-US', { maximumFractionDigits: 0 }) + ' BTC';
    document.getElementById('longRatio').textContent = formatPercent(deriv.long_ratio_pct, 1).replace('+', '');

    const defi = agg.defi;
    document.getElementById('tvl').textContent = formatUSDCompact(defi.tvl_usd);
    const tvlChangeEl = document.getElementById('tvlChange');
    tvlChangeEl.textContent = formatPercent(defi.tvl_change_30d_pct);
    tvlChangeEl.className = 'metric-value ' + changeClass(defi.tvl_change_30d_pct);
    document.getElementById('stableSupply').textContent = formatUSDCompact(defi.stablecoin_supply_usd);
    document.getElementById('stableChange').textContent = formatPercent(defi.stablecoin_change_30d_pct);

    const macro = agg.macro_feed;
    document.getElementById('m2Supply').textContent = formatUSDCompact(macro.m2_supply_usd);
    document.getElementById('m2Change').textContent = formatPercent(macro.m2_yoy_change_pct, 1);
    document.getElementById('m2Trend').textContent = macro.trend === 'expanding' ? 'Expanding' : 'Contracting';

    updateLivenessBadge(agg.liveness);
    updateProtocols(defi.top_protocols);
}

function updateProtocols(protocols) {
    const tbody = document.getElementById('protocolsBody');

    if (!protocols || protocols.length === 0) {
        tbody.innerHTML = '<tr><td colspan="3" style="text-align: center; color: var(--text-dim);">No data</td></tr>';
        return;
    }

    tbody.innerHTML = protocols.map((p, i) => `<tr>
        <td>${i + 1}</td>
        <td><strong>${p.name}</strong></td>
        <td>${formatUSDCompact(p.tvl_usd)}</td>
    </tr>`).join('');
}

// ============================================================================
// Main Update Function
// ============================================================================
async function updateDashboard() {
    const [snapshot, scores] = await Promise.all([
        fetchJSON('/api/snapshot'),
        fetchJSON('/api/scores')
    ]);

    updateTimestamp();
    updateSnapshot(snapshot);
    updateScores(scores);
}

// ============================================================================
// Button Actions
// ============================================================================
async function refreshAll() {
    const btn = document.getElementById('refreshBtn');
    btn.disabled = true;
    btn.textContent = '...';

    await updateDashboard();

    btn.disabled = false;
    btn.innerHTML = '&#8634; Refresh';
}

async function forceRefresh() {
    const btn = document.getElementById('forceBtn');
    btn.disabled = true;
    btn.textContent = 'Fetching...';

    try {
        const result = await fetch('/api/refresh', { method: 'POST' });
        const data = await result.json();

        if (data.error) {
            alert('Error: ' + data.message);
        }
    } catch (e) {
        alert('Error: ' + e.message);
    } finally {
        btn.disabled = false;
        btn.innerHTML = '&#9889; Fetch Now';
        updateDashboard();
    }
}

// ============================================================================
// Initialization
// ============================================================================
updateDashboard();
setInterval(updateDashboard, CONFIG.refreshInterval);
"#;
