// src/server/frontend.rs
// Embedded single-page search UI

pub(super) const FRONTEND_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AutoMart - Car Lookup</title>
    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?family=JetBrains+Mono:wght@400;500&family=Outfit:wght@400;500;600;700&display=swap" rel="stylesheet">
    <style>
        :root {
            --bg-primary: #0a0a0f;
            --bg-secondary: #12121a;
            --bg-card: #16161f;
            --border: #2a2a3d;
            --text-primary: #f0f0f5;
            --text-secondary: #8888a0;
            --accent: #6366f1;
            --success: #22c55e;
            --warning: #f59e0b;
            --danger: #ef4444;
        }

        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: 'Outfit', -apple-system, BlinkMacSystemFont, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            min-height: 100vh;
        }

        header {
            padding: 24px 32px;
            border-bottom: 1px solid var(--border);
            background: var(--bg-secondary);
        }

        header h1 {
            font-size: 22px;
            font-weight: 600;
        }

        header p {
            color: var(--text-secondary);
            font-size: 14px;
            margin-top: 4px;
        }

        main {
            max-width: 1100px;
            margin: 0 auto;
            padding: 32px;
        }

        .search {
            display: grid;
            grid-template-columns: 1fr 1fr 1fr auto;
            gap: 12px;
            margin-bottom: 24px;
        }

        select, button {
            font-family: inherit;
            font-size: 15px;
            padding: 10px 12px;
            border-radius: 8px;
            border: 1px solid var(--border);
            background: var(--bg-card);
            color: var(--text-primary);
        }

        button {
            background: var(--accent);
            border-color: var(--accent);
            cursor: pointer;
            font-weight: 600;
        }

        button:disabled {
            opacity: 0.5;
            cursor: default;
        }

        .status {
            color: var(--text-secondary);
            margin-bottom: 16px;
            min-height: 20px;
        }

        .status.error {
            color: var(--danger);
        }

        .notice {
            color: var(--warning);
            font-size: 13px;
            margin-bottom: 16px;
        }

        .trims {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(320px, 1fr));
            gap: 16px;
        }

        .trim {
            background: var(--bg-card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 18px;
        }

        .trim h3 {
            font-size: 17px;
            margin-bottom: 4px;
        }

        .trim .desc {
            color: var(--text-secondary);
            font-size: 13px;
            margin-bottom: 12px;
        }

        .price {
            display: inline-block;
            font-family: 'JetBrains Mono', monospace;
            background: rgba(34, 197, 94, 0.12);
            color: var(--success);
            border-radius: 6px;
            padding: 4px 8px;
            margin-bottom: 12px;
            font-size: 14px;
        }

        .badge {
            font-family: 'Outfit', sans-serif;
            font-size: 11px;
            text-transform: uppercase;
            letter-spacing: 0.04em;
            margin-left: 8px;
            color: var(--text-secondary);
        }

        .specs {
            display: grid;
            grid-template-columns: auto 1fr;
            gap: 4px 12px;
            font-size: 13px;
        }

        .specs dt {
            color: var(--text-secondary);
        }

        .specs dd {
            font-family: 'JetBrains Mono', monospace;
        }
    </style>
</head>
<body>
    <header>
        <h1>AutoMart</h1>
        <p>Specs and estimated market value for every trim</p>
    </header>
    <main>
        <div class="search">
            <select id="year"><option value="">Year</option></select>
            <select id="make"><option value="">Make</option></select>
            <select id="model" disabled><option value="">Model</option></select>
            <button id="go" disabled>Look up</button>
        </div>
        <div id="status" class="status"></div>
        <div id="notice" class="notice"></div>
        <div id="trims" class="trims"></div>
    </main>
    <script>
        const $ = (id) => document.getElementById(id);
        const money = (n) => '$' + Number(n).toLocaleString('en-US');

        function escapeHtml(s) {
            return String(s ?? '').replace(/[&<>"']/g, (c) => ({
                '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
            }[c]));
        }

        function setStatus(text, isError) {
            $('status').textContent = text || '';
            $('status').className = isError ? 'status error' : 'status';
        }

        function fillSelect(el, placeholder, values) {
            el.innerHTML = '<option value="">' + placeholder + '</option>' +
                values.map((v) => '<option value="' + escapeHtml(v) + '">' + escapeHtml(v) + '</option>').join('');
        }

        async function getJson(url) {
            const res = await fetch(url);
            return res.json();
        }

        async function loadYears() {
            const data = await getJson('/api/years');
            fillSelect($('year'), 'Any year', data.years || []);
        }

        async function loadMakes() {
            const year = $('year').value;
            const data = await getJson('/api/makes' + (year ? '?year=' + year : ''));
            fillSelect($('make'), 'Make', (data.makes || []).map((m) => m.name));
            $('model').disabled = true;
            $('go').disabled = true;
        }

        async function loadModels() {
            const make = $('make').value;
            $('go').disabled = true;
            if (!make) {
                $('model').disabled = true;
                return;
            }
            const year = $('year').value;
            const params = new URLSearchParams({ make });
            if (year) params.set('year', year);
            const data = await getJson('/api/models?' + params);
            if (!data.success) {
                setStatus(data.error, true);
                fillSelect($('model'), 'Model', []);
                return;
            }
            setStatus('');
            fillSelect($('model'), 'Model', data.models.map((m) => m.name));
            $('model').disabled = false;
        }

        function renderTrim(t) {
            const price = t.estimated_price
                ? '<div class="price">' + money(t.estimated_price) + ' est. (MSRP ' + money(t.msrp) + ', -' + t.depreciation_pct + '%)' +
                    ' <span class="badge">' + escapeHtml(t.price_label) + '</span></div>'
                : '';
            const subtitle = [t.submodel, t.description].filter(Boolean).join(' \u00b7 ');
            const rows = [
                ['Engine', t.engine], ['Fuel', t.fuel_type], ['Power', t.horsepower],
                ['Torque', t.torque], ['Transmission', t.transmission],
                ['Drive', t.drive_type], ['Cylinders', t.cylinders]
            ].map(([k, v]) => '<dt>' + k + '</dt><dd>' + escapeHtml(v) + '</dd>').join('');
            return '<div class="trim"><h3>' + escapeHtml(t.trim_name) + '</h3>' +
                '<div class="desc">' + escapeHtml(subtitle) + '</div>' +
                price + '<dl class="specs">' + rows + '</dl></div>';
        }

        async function lookup() {
            const params = new URLSearchParams({ make: $('make').value, model: $('model').value });
            if ($('year').value) params.set('year', $('year').value);
            setStatus('Loading...');
            $('notice').textContent = '';
            $('trims').innerHTML = '';
            const data = await getJson('/api/car?' + params);
            if (!data.success) {
                setStatus(data.error + (data.suggestions ? ' ' + data.suggestions : ''), true);
                return;
            }
            const v = data.vehicle;
            setStatus(v.year + ' ' + v.make + ' ' + v.model + ': ' + v.total_trims + ' trim(s)');
            if (v.source === 'fallback') {
                $('notice').textContent = 'Some data sources were unavailable; results may be incomplete.';
            }
            $('trims').innerHTML = v.trims.map(renderTrim).join('');
        }

        $('year').addEventListener('change', loadMakes);
        $('make').addEventListener('change', loadModels);
        $('model').addEventListener('change', () => { $('go').disabled = !$('model').value; });
        $('go').addEventListener('click', () => lookup().catch((e) => setStatus(e.message, true)));

        loadYears().then(loadMakes).catch((e) => setStatus(e.message, true));
    </script>
</body>
</html>
"##;
