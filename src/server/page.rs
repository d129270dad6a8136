//! Dashboard page: filter controls plus two Plotly charts redrawn on every change

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>P&amp;C Insurance Loss Ratio Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
    <style>
        :root {
            --background: #f0f2f5;
            --text: #2c3e50;
            --primary: #3498db;
            --white: #ffffff;
        }
        body { margin: 0; background: var(--background); color: var(--text); font-family: 'Segoe UI', Arial, sans-serif; }
        header { background: var(--primary); color: var(--white); padding: 20px 30px; text-align: center; }
        header h1 { margin: 0; font-size: 2.2em; }
        header p { margin: 10px 0 0; opacity: 0.9; }
        main { padding: 30px; }
        .card { background: var(--white); padding: 25px; border-radius: 8px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
        .filters { display: flex; flex-wrap: wrap; gap: 25px; margin-bottom: 30px; }
        .filters label { font-weight: 600; display: block; margin-bottom: 8px; }
        .filters select { width: 100%; min-height: 6em; }
        .graphs { display: flex; flex-wrap: wrap; gap: 30px; }
        #summary { margin-bottom: 20px; font-size: 1.1em; }
    </style>
</head>
<body>
<header>
    <h1>P&amp;C Insurance Loss Ratio Dashboard</h1>
    <p>Reported vs developed loss ratios by business line and region.</p>
</header>
<main>
    <div class="card filters">
        <div style="flex: 1 1 250px"><label for="lines">Business Line</label><select id="lines" multiple></select></div>
        <div style="flex: 1 1 250px"><label for="regions">Region</label><select id="regions" multiple></select></div>
        <div style="flex: 2 1 400px">
            <label>Date Range</label>
            <input type="date" id="start"> to <input type="date" id="end">
        </div>
    </div>
    <div id="summary" class="card"></div>
    <div class="graphs">
        <div class="card" style="flex: 2 1 600px"><div id="series"></div></div>
        <div class="card" style="flex: 1 1 300px"><div id="comparison"></div></div>
    </div>
</main>
<script>
const palette = ['#3498db', '#e67e22', '#2ecc71', '#9b59b6', '#f1c40f', '#e74c3c', '#34495e'];
const pct = v => (v * 100).toFixed(1) + '%';

function fill(select, values) {
    select.innerHTML = '';
    for (const v of values) {
        const opt = document.createElement('option');
        opt.value = v; opt.textContent = v; opt.selected = true;
        select.appendChild(opt);
    }
}

function selected(select) {
    return Array.from(select.selectedOptions).map(o => o.value);
}

async function redraw() {
    const filter = {
        business_lines: selected(document.getElementById('lines')),
        regions: selected(document.getElementById('regions')),
        start: document.getElementById('start').value || null,
        end: document.getElementById('end').value || null,
    };
    const res = await fetch('/api/dashboard', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(filter),
    });
    const view = await res.json();
    if (!res.ok) {
        document.getElementById('summary').textContent = view.error || 'request failed';
        return;
    }

    const t = view.totals;
    document.getElementById('summary').textContent = t.rows === 0
        ? 'No data for this selection.'
        : `Premium ${t.earned_premium.toLocaleString()} | reported LR ${pct(t.reported_loss_ratio)} | developed LR ${pct(t.developed_loss_ratio)}`;

    const lines = [...new Set(view.series.map(p => p.business_line))];
    const traces = [];
    lines.forEach((line, i) => {
        const pts = view.series.filter(p => p.business_line === line);
        const color = palette[i % palette.length];
        traces.push({ x: pts.map(p => p.period), y: pts.map(p => p.reported_loss_ratio), name: line + ' (reported)',
                      mode: 'lines+markers', line: { color } });
        traces.push({ x: pts.map(p => p.period), y: pts.map(p => p.developed_loss_ratio), name: line + ' (developed)',
                      mode: 'lines', line: { color, dash: 'dash' } });
    });
    Plotly.react('series', traces, {
        title: '<b>Monthly Loss Ratio: Reported vs Developed</b>',
        yaxis: { tickformat: '.0%' },
        legend: { orientation: 'h' },
    });

    const cmp = view.comparison;
    Plotly.react('comparison', [
        { type: 'bar', orientation: 'h', name: 'Reported', y: cmp.map(c => c.business_line), x: cmp.map(c => c.reported_loss_ratio), marker: { color: palette[0] } },
        { type: 'bar', orientation: 'h', name: 'Developed', y: cmp.map(c => c.business_line), x: cmp.map(c => c.developed_loss_ratio), marker: { color: palette[1] } },
    ], {
        title: '<b>Avg. Loss Ratio</b>',
        barmode: 'group',
        xaxis: { tickformat: '.0%' },
    });
}

async function init() {
    const options = await (await fetch('/api/options')).json();
    fill(document.getElementById('lines'), options.business_lines);
    fill(document.getElementById('regions'), options.regions);
    for (const [id, value] of [['start', options.min_period], ['end', options.max_period]]) {
        const input = document.getElementById(id);
        input.min = options.min_period; input.max = options.max_period;
        if (value) input.value = value;
    }
    for (const id of ['lines', 'regions', 'start', 'end']) {
        document.getElementById(id).addEventListener('change', redraw);
    }
    redraw();
}

init();
</script>
</body>
</html>
"##;
