pub fn render_index(date: &str) -> String {
    INDEX_HTML.replace("{{DATE}}", date)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Zenith Planner</title>
  <script src="https://cdn.jsdelivr.net/npm/html-to-image@1.11.11/dist/html-to-image.js"></script>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600;700&display=swap');

    :root {
      --bg: #f8fafc;
      --ink: #0f172a;
      --muted: #64748b;
      --faint: #cbd5e1;
      --line: #e2e8f0;
      --card: #ffffff;
      --accent: #4f46e5;
      --accent-soft: #eef2ff;
      --good: #10b981;
      --good-soft: #ecfdf5;
      --bad: #f43f5e;
      --bad-soft: #fff1f2;
      --shadow: 0 18px 40px rgba(15, 23, 42, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: flex;
    }

    .sidebar {
      width: 250px;
      min-height: 100vh;
      background: var(--card);
      border-right: 1px solid var(--line);
      padding: 28px 18px;
      display: flex;
      flex-direction: column;
      gap: 28px;
      position: sticky;
      top: 0;
      align-self: flex-start;
    }

    .brand {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .brand-mark {
      width: 42px;
      height: 42px;
      border-radius: 14px;
      background: var(--accent);
      color: #fff;
      display: grid;
      place-items: center;
      font-weight: 700;
      font-size: 1.3rem;
    }

    .brand-name {
      font-weight: 700;
      font-size: 1.15rem;
      letter-spacing: 0.02em;
    }

    .brand-sub {
      font-size: 0.62rem;
      font-weight: 700;
      letter-spacing: 0.28em;
      text-transform: uppercase;
      color: var(--accent);
    }

    .nav {
      display: flex;
      flex-direction: column;
      gap: 6px;
      flex: 1;
    }

    .nav button {
      text-align: left;
      padding: 12px 16px;
      border: none;
      border-radius: 14px;
      background: transparent;
      color: var(--muted);
      font: inherit;
      font-weight: 600;
      font-size: 0.85rem;
      letter-spacing: 0.06em;
      text-transform: uppercase;
      cursor: pointer;
      transition: background 160ms ease, color 160ms ease;
    }

    .nav button:hover {
      background: var(--bg);
      color: var(--ink);
    }

    .nav button.active {
      background: var(--ink);
      color: #fff;
    }

    .sync {
      border: 1px solid var(--line);
      border-radius: 18px;
      padding: 16px;
      font-size: 0.72rem;
      color: var(--muted);
    }

    .sync .dot {
      display: inline-block;
      width: 8px;
      height: 8px;
      border-radius: 50%;
      background: var(--good);
      margin-right: 7px;
    }

    main {
      flex: 1;
      padding: 40px clamp(20px, 5vw, 64px);
      max-width: 1120px;
    }

    .view {
      display: none;
    }

    .view.active {
      display: block;
      animation: rise 300ms ease;
    }

    @keyframes rise {
      from { opacity: 0; transform: translateY(10px); }
      to { opacity: 1; transform: none; }
    }

    h2 {
      margin: 0 0 4px;
      font-size: 2rem;
      letter-spacing: -0.02em;
    }

    .lede {
      margin: 0 0 28px;
      color: var(--muted);
      font-size: 0.95rem;
    }

    .view-head {
      display: flex;
      justify-content: space-between;
      align-items: flex-end;
      gap: 16px;
      flex-wrap: wrap;
      margin-bottom: 8px;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(230px, 1fr));
      gap: 18px;
      margin-bottom: 28px;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 24px;
      padding: 24px;
      box-shadow: var(--shadow);
    }

    .card .label {
      font-size: 0.65rem;
      font-weight: 700;
      text-transform: uppercase;
      letter-spacing: 0.18em;
      color: var(--muted);
      margin-bottom: 8px;
    }

    .card .value {
      font-size: 1.9rem;
      font-weight: 700;
    }

    .card .value.good { color: var(--good); }
    .card .value.bad { color: var(--bad); }
    .card .value.accent { color: var(--accent); }

    .meter {
      margin-top: 14px;
      width: 100%;
      height: 8px;
      background: var(--line);
      border-radius: 999px;
      overflow: hidden;
    }

    .meter > div {
      height: 100%;
      background: var(--good);
      transition: width 500ms ease;
    }

    .split {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 18px;
    }

    .panel {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 24px;
      padding: 24px;
    }

    .panel h3 {
      margin: 0 0 16px;
      font-size: 1.05rem;
    }

    .habit-row {
      display: flex;
      align-items: center;
      gap: 14px;
      padding: 13px 16px;
      border: 1px solid var(--line);
      border-radius: 16px;
      margin-bottom: 10px;
      cursor: pointer;
      transition: border-color 160ms ease, background 160ms ease;
    }

    .habit-row:hover {
      border-color: var(--faint);
    }

    .habit-row.done {
      background: var(--accent-soft);
      border-color: var(--accent-soft);
    }

    .habit-row .check {
      width: 26px;
      height: 26px;
      border-radius: 50%;
      border: 2px solid var(--faint);
      display: grid;
      place-items: center;
      color: transparent;
      font-size: 0.8rem;
      flex-shrink: 0;
    }

    .habit-row.done .check {
      background: var(--accent);
      border-color: var(--accent);
      color: #fff;
    }

    .habit-row .name {
      font-weight: 600;
      font-size: 0.9rem;
    }

    .habit-row.done .name {
      text-decoration: line-through;
      color: var(--muted);
    }

    .habit-row .cat,
    .entry .cat {
      font-size: 0.6rem;
      font-weight: 700;
      text-transform: uppercase;
      letter-spacing: 0.18em;
      color: var(--muted);
    }

    .habit-row .remove,
    .entry .remove {
      margin-left: auto;
      border: none;
      background: none;
      color: var(--faint);
      font-size: 1rem;
      cursor: pointer;
      padding: 6px;
    }

    .habit-row .remove:hover,
    .entry .remove:hover {
      color: var(--bad);
    }

    form.inline {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
      align-items: end;
      margin-bottom: 20px;
    }

    .field label {
      display: block;
      font-size: 0.62rem;
      font-weight: 700;
      text-transform: uppercase;
      letter-spacing: 0.18em;
      color: var(--muted);
      margin-bottom: 6px;
    }

    .field input,
    .field textarea {
      width: 100%;
      padding: 12px 14px;
      border: 1px solid var(--line);
      border-radius: 14px;
      background: var(--bg);
      font: inherit;
      font-size: 0.9rem;
      outline: none;
    }

    .field input:focus,
    .field textarea:focus {
      border-color: var(--accent);
    }

    .field.invalid input {
      border-color: var(--bad);
      background: var(--bad-soft);
    }

    .field-error {
      font-size: 0.68rem;
      font-weight: 700;
      color: var(--bad);
      margin-top: 5px;
      min-height: 0.9em;
    }

    button.primary {
      border: none;
      border-radius: 14px;
      background: var(--ink);
      color: #fff;
      font: inherit;
      font-weight: 700;
      font-size: 0.75rem;
      letter-spacing: 0.12em;
      text-transform: uppercase;
      padding: 14px 22px;
      cursor: pointer;
      transition: transform 120ms ease, background 160ms ease;
    }

    button.primary:hover {
      background: #1e293b;
    }

    button.primary:active {
      transform: scale(0.97);
    }

    button.primary.accent {
      background: var(--accent);
    }

    .slider-card .reading {
      font-size: 1.7rem;
      font-weight: 700;
      margin-bottom: 14px;
    }

    .slider-card input[type=range] {
      width: 100%;
      accent-color: var(--accent);
    }

    .slider-card .bounds {
      display: flex;
      justify-content: space-between;
      font-size: 0.62rem;
      font-weight: 700;
      text-transform: uppercase;
      letter-spacing: 0.16em;
      color: var(--faint);
      margin-top: 8px;
    }

    .ledger {
      margin-top: 18px;
    }

    .ledger-head {
      display: flex;
      justify-content: space-between;
      font-size: 0.66rem;
      font-weight: 700;
      text-transform: uppercase;
      letter-spacing: 0.18em;
      color: var(--muted);
      padding: 0 4px 12px;
      border-bottom: 1px solid var(--line);
    }

    .entry {
      display: flex;
      align-items: center;
      gap: 14px;
      padding: 16px 4px;
      border-bottom: 1px solid var(--line);
    }

    .entry .badge {
      width: 38px;
      height: 38px;
      border-radius: 12px;
      display: grid;
      place-items: center;
      font-weight: 700;
      flex-shrink: 0;
    }

    .entry.income .badge { background: var(--good-soft); color: var(--good); }
    .entry.expense .badge { background: var(--bad-soft); color: var(--bad); }

    .entry .desc { font-weight: 700; font-size: 0.92rem; }
    .entry .when { font-size: 0.66rem; color: var(--faint); font-weight: 600; }

    .entry .amount {
      margin-left: auto;
      font-weight: 700;
      font-size: 1.05rem;
    }

    .entry.income .amount { color: var(--good); }

    .empty {
      text-align: center;
      color: var(--faint);
      font-style: italic;
      padding: 40px 0;
      font-size: 0.88rem;
    }

    .cal-nav {
      display: flex;
      gap: 8px;
    }

    .cal-nav button {
      border: 1px solid var(--line);
      background: var(--card);
      border-radius: 12px;
      padding: 8px 14px;
      font: inherit;
      font-weight: 700;
      cursor: pointer;
      color: var(--muted);
    }

    .cal-nav button:hover {
      color: var(--ink);
    }

    .report {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 24px;
      padding: 28px;
      box-shadow: var(--shadow);
    }

    .report h3 {
      margin: 0 0 20px;
      font-size: 1.5rem;
      letter-spacing: -0.02em;
    }

    .report .cards {
      margin-bottom: 20px;
    }

    .grid7 {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      border-top: 1px solid var(--line);
      border-left: 1px solid var(--line);
    }

    .grid7 .dow {
      padding: 12px 0;
      text-align: center;
      font-size: 0.62rem;
      font-weight: 700;
      text-transform: uppercase;
      letter-spacing: 0.16em;
      color: var(--faint);
      border-bottom: 1px solid var(--line);
      border-right: 1px solid var(--line);
    }

    .grid7 .cell {
      min-height: 84px;
      border-bottom: 1px solid var(--line);
      border-right: 1px solid var(--line);
      padding: 8px;
      display: flex;
      flex-direction: column;
    }

    .grid7 .cell.today {
      background: var(--accent-soft);
    }

    .grid7 .cell .num {
      font-size: 0.72rem;
      font-weight: 700;
      color: var(--muted);
    }

    .grid7 .cell.today .num {
      color: var(--accent);
    }

    .grid7 .dots {
      margin-top: auto;
      display: flex;
      flex-wrap: wrap;
      gap: 3px;
      margin-bottom: 5px;
    }

    .grid7 .dots i {
      width: 5px;
      height: 5px;
      border-radius: 50%;
      background: var(--accent);
    }

    .grid7 .bar {
      width: 100%;
      height: 4px;
      background: var(--line);
      border-radius: 999px;
      overflow: hidden;
    }

    .grid7 .bar > div {
      height: 100%;
      background: var(--accent);
    }

    .report-foot {
      display: flex;
      justify-content: space-between;
      margin-top: 20px;
      padding-top: 16px;
      border-top: 1px solid var(--line);
      font-size: 0.64rem;
      font-weight: 700;
      text-transform: uppercase;
      letter-spacing: 0.2em;
      color: var(--faint);
    }

    .status {
      min-height: 1.2em;
      margin-top: 18px;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .status[data-type='error'] {
      color: var(--bad);
    }

    @media (max-width: 760px) {
      body { flex-direction: column; }
      .sidebar {
        width: 100%;
        min-height: 0;
        position: static;
        flex-direction: row;
        align-items: center;
        overflow-x: auto;
      }
      .nav { flex-direction: row; }
      .sync { display: none; }
    }
  </style>
</head>
<body>
  <aside class="sidebar">
    <div class="brand">
      <div class="brand-mark">Z</div>
      <div>
        <div class="brand-name">Zenith</div>
        <div class="brand-sub">Planner</div>
      </div>
    </div>
    <nav class="nav" id="nav">
      <button class="active" type="button" data-view="dashboard">Dashboard</button>
      <button type="button" data-view="habits">Habits</button>
      <button type="button" data-view="health">Health</button>
      <button type="button" data-view="wealth">Wealth</button>
      <button type="button" data-view="calendar">Calendar</button>
    </nav>
    <div class="sync">
      <span class="dot"></span>Local save active
      <div id="sync-time" style="margin-top:6px;"></div>
    </div>
  </aside>

  <main>
    <section class="view active" data-view="dashboard">
      <h2>Dashboard</h2>
      <p class="lede">Daily overview for <span id="dash-date">{{DATE}}</span>.</p>
      <div class="cards">
        <div class="card">
          <div class="label">Daily Completion</div>
          <div class="value good" id="dash-habit-rate">0%</div>
          <div class="meter"><div id="dash-habit-meter" style="width:0%"></div></div>
        </div>
        <div class="card">
          <div class="label">Monthly Balance</div>
          <div class="value" id="dash-net">$0.00</div>
          <div class="label" id="dash-net-word" style="margin-top:8px;"></div>
        </div>
        <div class="card">
          <div class="label">Today's Health</div>
          <div class="value accent" id="dash-sleep">0h sleep</div>
          <div class="label" id="dash-health-extra" style="margin-top:8px;"></div>
        </div>
      </div>
      <div class="split">
        <div class="panel">
          <h3>Daily habits</h3>
          <div id="dash-habits"></div>
        </div>
        <div class="panel">
          <h3>Recent wealth</h3>
          <div id="dash-wealth"></div>
        </div>
      </div>
    </section>

    <section class="view" data-view="habits">
      <h2>Habits</h2>
      <p class="lede">Track your daily habits and routines.</p>
      <div class="panel">
        <form class="inline" id="habit-form">
          <div class="field" id="habit-name-field">
            <label for="habit-name">Habit name</label>
            <input id="habit-name" type="text" placeholder="e.g. Read for 30 mins" autocomplete="off" />
            <div class="field-error" id="habit-error"></div>
          </div>
          <div class="field">
            <label for="habit-cat">Category</label>
            <input id="habit-cat" type="text" placeholder="e.g. Health" autocomplete="off" />
            <div class="field-error"></div>
          </div>
          <div class="field">
            <button class="primary accent" type="submit">Add habit</button>
            <div class="field-error"></div>
          </div>
        </form>
        <div id="habit-list"></div>
      </div>
    </section>

    <section class="view" data-view="health">
      <h2>Health</h2>
      <p class="lede">Log your sleep, hydration, activity, and weight.</p>
      <div class="cards" id="health-sliders"></div>
      <div class="panel">
        <div class="field">
          <label for="health-notes">Notes for today</label>
          <textarea id="health-notes" rows="3" placeholder="How did today feel?"></textarea>
        </div>
      </div>
    </section>

    <section class="view" data-view="wealth">
      <h2>Wealth</h2>
      <p class="lede">Track your income and expenses. Positive amounts are income, negative are expenses.</p>
      <div class="panel">
        <form class="inline" id="wealth-form">
          <div class="field" id="wealth-desc-field">
            <label for="wealth-desc">Label</label>
            <input id="wealth-desc" type="text" placeholder="e.g. Salary, Rent" autocomplete="off" />
            <div class="field-error" id="wealth-desc-error"></div>
          </div>
          <div class="field">
            <label for="wealth-cat">Category</label>
            <input id="wealth-cat" type="text" placeholder="e.g. Food, Work" autocomplete="off" />
            <div class="field-error"></div>
          </div>
          <div class="field" id="wealth-amt-field">
            <label for="wealth-amt">Amount ($)</label>
            <input id="wealth-amt" type="number" step="0.01" placeholder="0.00" />
            <div class="field-error" id="wealth-amt-error"></div>
          </div>
          <div class="field">
            <button class="primary" type="submit">Save entry</button>
            <div class="field-error"></div>
          </div>
        </form>
        <div class="ledger">
          <div class="ledger-head">
            <span>Transaction log</span>
            <span id="wealth-count">0 entries</span>
          </div>
          <div id="wealth-list"></div>
        </div>
      </div>
    </section>

    <section class="view" data-view="calendar">
      <div class="view-head">
        <div>
          <h2>Calendar</h2>
          <p class="lede">Monthly performance reports.</p>
        </div>
        <button class="primary accent" type="button" id="export-btn">Export report</button>
      </div>
      <div class="report" id="calendar-report">
        <div class="view-head">
          <h3 id="cal-title"></h3>
          <div class="cal-nav">
            <button type="button" id="cal-prev">&larr;</button>
            <button type="button" id="cal-next">&rarr;</button>
          </div>
        </div>
        <div class="cards">
          <div class="card">
            <div class="label">Habit completion</div>
            <div class="value good" id="cal-completion">0%</div>
          </div>
          <div class="card">
            <div class="label">Monthly net</div>
            <div class="value" id="cal-net">$0.00</div>
          </div>
          <div class="card">
            <div class="label">Avg sleep</div>
            <div class="value accent" id="cal-sleep">0h</div>
          </div>
          <div class="card">
            <div class="label">Avg steps</div>
            <div class="value" id="cal-steps">0</div>
          </div>
        </div>
        <div class="grid7" id="cal-grid"></div>
        <div class="report-foot">
          <span>Zenith Planner</span>
          <span id="cal-generated"></span>
        </div>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const TODAY = '{{DATE}}';

    const SLIDERS = [
      { field: 'sleepHours', label: 'Sleep quality', unit: 'h', max: 12, step: 0.5 },
      { field: 'waterIntake', label: 'Water intake', unit: 'L', max: 8, step: 0.5 },
      { field: 'steps', label: 'Steps', unit: '', max: 20000, step: 500 },
      { field: 'weight', label: 'Weight', unit: 'kg', max: 300, step: 0.5 },
    ];

    const statusEl = document.getElementById('status');
    const navEl = document.getElementById('nav');

    let planner = { habits: [], health: {}, wealth: [], lastSaved: '' };
    let activeView = 'dashboard';
    let calYear = Number(TODAY.slice(0, 4));
    let calMonth = Number(TODAY.slice(5, 7));
    let exporting = false;

    const money = new Intl.NumberFormat('en-US', { style: 'currency', currency: 'USD' });

    const escapeHtml = (text) =>
      String(text).replace(/[&<>"']/g, (ch) => ({
        '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;',
      }[ch]));

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      if (message) {
        setTimeout(() => { statusEl.textContent = ''; }, 2000);
      }
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        const message = await res.text();
        const error = new Error(message || res.statusText);
        error.status = res.status;
        throw error;
      }
      return res.json();
    };

    const loadState = async () => {
      planner = await api('/api/state');
      renderAll();
    };

    const mutate = async (path, options) => {
      await api(path, options);
      await loadState();
    };

    const jsonBody = (payload) => ({
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(payload),
    });

    const healthToday = () => planner.health[TODAY] || {};

    const setView = (view) => {
      activeView = view;
      Array.from(navEl.querySelectorAll('button')).forEach((button) => {
        button.classList.toggle('active', button.dataset.view === view);
      });
      Array.from(document.querySelectorAll('.view')).forEach((section) => {
        section.classList.toggle('active', section.dataset.view === view);
      });
      if (view === 'calendar') {
        refreshCalendar().catch((err) => setStatus(err.message, 'error'));
      }
    };

    const habitRow = (habit, compact) => {
      const done = habit.completedDays.includes(TODAY);
      const remove = compact ? '' :
        '<button class="remove" type="button" data-remove="' + habit.id + '" title="Delete habit">&times;</button>';
      return '<div class="habit-row' + (done ? ' done' : '') + '" data-toggle="' + habit.id + '">' +
        '<span class="check">&#10003;</span>' +
        '<span><span class="name">' + escapeHtml(habit.name) + '</span><br />' +
        '<span class="cat">' + escapeHtml(habit.category) + '</span></span>' +
        remove + '</div>';
    };

    const renderDashboard = () => {
      const total = planner.habits.length;
      const done = planner.habits.filter((h) => h.completedDays.includes(TODAY)).length;
      const rate = total ? Math.round((done / total) * 100) : 0;
      document.getElementById('dash-habit-rate').textContent = rate + '%';
      document.getElementById('dash-habit-meter').style.width = rate + '%';

      let net = 0;
      for (const entry of planner.wealth) {
        const when = new Date(entry.date);
        if (when.getFullYear() === Number(TODAY.slice(0, 4)) && when.getMonth() + 1 === Number(TODAY.slice(5, 7))) {
          net += entry.type === 'income' ? entry.amount : -entry.amount;
        }
      }
      const netEl = document.getElementById('dash-net');
      netEl.textContent = money.format(net);
      netEl.className = 'value ' + (net >= 0 ? 'good' : 'bad');
      document.getElementById('dash-net-word').textContent = net >= 0 ? 'Surplus' : 'Deficit';

      const record = healthToday();
      document.getElementById('dash-sleep').textContent = (record.sleepHours || 0) + 'h sleep';
      document.getElementById('dash-health-extra').textContent =
        (record.waterIntake || 0) + 'L water / ' + (record.steps || 0) + ' steps';

      const habitsEl = document.getElementById('dash-habits');
      habitsEl.innerHTML = planner.habits.length
        ? planner.habits.slice(0, 6).map((habit) => habitRow(habit, true)).join('')
        : '<div class="empty">No habits added yet.</div>';

      const wealthEl = document.getElementById('dash-wealth');
      wealthEl.innerHTML = planner.wealth.length
        ? planner.wealth.slice(0, 4).map((entry) => wealthRow(entry, true)).join('')
        : '<div class="empty">No recent entries.</div>';
    };

    const renderHabits = () => {
      const listEl = document.getElementById('habit-list');
      listEl.innerHTML = planner.habits.length
        ? planner.habits.map((habit) => habitRow(habit, false)).join('')
        : '<div class="empty">No habits yet. Add one above to begin.</div>';
    };

    const renderHealth = () => {
      const record = healthToday();
      const slidersEl = document.getElementById('health-sliders');
      slidersEl.innerHTML = SLIDERS.map((meta) => {
        const value = record[meta.field] || 0;
        return '<div class="card slider-card">' +
          '<div class="label">' + meta.label + '</div>' +
          '<div class="reading">' + value + (meta.unit || '') + '</div>' +
          '<input type="range" min="0" max="' + meta.max + '" step="' + meta.step +
          '" value="' + value + '" data-field="' + meta.field + '" />' +
          '<div class="bounds"><span>Low</span><span>High (' + meta.max + (meta.unit || '') + ')</span></div>' +
          '</div>';
      }).join('');
      const notesEl = document.getElementById('health-notes');
      if (document.activeElement !== notesEl) {
        notesEl.value = record.notes || '';
      }
    };

    const wealthRow = (entry, compact) => {
      const sign = entry.type === 'income' ? '+' : '-';
      const glyph = entry.type === 'income' ? '&#8599;' : '&#8600;';
      const when = new Date(entry.date).toLocaleDateString('en-US', {
        month: 'short', day: 'numeric', year: 'numeric',
      });
      const remove = compact ? '' :
        '<button class="remove" type="button" data-remove-wealth="' + entry.id + '" title="Delete entry">&times;</button>';
      return '<div class="entry ' + entry.type + '">' +
        '<span class="badge">' + glyph + '</span>' +
        '<span><span class="desc">' + escapeHtml(entry.description) + '</span><br />' +
        '<span class="cat">' + escapeHtml(entry.category) + '</span> <span class="when">' + when + '</span></span>' +
        '<span class="amount">' + sign + money.format(entry.amount) + '</span>' +
        remove + '</div>';
    };

    const renderWealth = () => {
      const count = planner.wealth.length;
      document.getElementById('wealth-count').textContent =
        count + (count === 1 ? ' entry' : ' entries');
      const listEl = document.getElementById('wealth-list');
      listEl.innerHTML = count
        ? planner.wealth.map((entry) => wealthRow(entry, false)).join('')
        : '<div class="empty">No entries logged yet.</div>';
    };

    const daysInMonth = (year, month) => new Date(year, month, 0).getDate();

    const renderCalendarGrid = () => {
      const title = new Date(calYear, calMonth - 1, 1).toLocaleDateString('en-US', {
        month: 'long', year: 'numeric',
      });
      document.getElementById('cal-title').textContent = title;
      document.getElementById('cal-generated').textContent =
        'Generated ' + new Date().toLocaleDateString();

      const startDay = new Date(calYear, calMonth - 1, 1).getDay();
      const total = daysInMonth(calYear, calMonth);
      const habitCount = planner.habits.length || 1;

      const parts = ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat']
        .map((d) => '<div class="dow">' + d + '</div>');
      for (let i = 0; i < startDay; i += 1) {
        parts.push('<div class="cell"></div>');
      }
      for (let d = 1; d <= total; d += 1) {
        const dateStr = calYear + '-' + String(calMonth).padStart(2, '0') + '-' + String(d).padStart(2, '0');
        const doneCount = planner.habits.filter((h) => h.completedDays.includes(dateStr)).length;
        const dots = Array.from({ length: Math.min(doneCount, 6) }).map(() => '<i></i>').join('');
        const width = Math.round((doneCount / habitCount) * 100);
        parts.push(
          '<div class="cell' + (dateStr === TODAY ? ' today' : '') + '">' +
          '<span class="num">' + d + '</span>' +
          '<div class="dots">' + dots + '</div>' +
          '<div class="bar"><div style="width:' + width + '%"></div></div>' +
          '</div>'
        );
      }
      document.getElementById('cal-grid').innerHTML = parts.join('');
    };

    const refreshCalendar = async () => {
      renderCalendarGrid();
      const stats = await api('/api/stats?year=' + calYear + '&month=' + calMonth);
      document.getElementById('cal-completion').textContent = stats.habitCompletion + '%';
      const netEl = document.getElementById('cal-net');
      netEl.textContent = money.format(stats.net);
      netEl.className = 'value ' + (stats.net >= 0 ? 'good' : 'bad');
      document.getElementById('cal-sleep').textContent = stats.avgSleep + 'h';
      document.getElementById('cal-steps').textContent = stats.avgSteps.toLocaleString();
    };

    const renderAll = () => {
      renderDashboard();
      renderHabits();
      renderHealth();
      renderWealth();
      if (activeView === 'calendar') {
        renderCalendarGrid();
      }
      if (planner.lastSaved) {
        document.getElementById('sync-time').textContent =
          'Synced ' + new Date(planner.lastSaved).toLocaleTimeString([], { hour: '2-digit', minute: '2-digit' });
      }
    };

    // One export at a time: a request made while one is pending is rejected.
    const exportReport = async () => {
      if (exporting) {
        return;
      }
      exporting = true;
      const node = document.getElementById('calendar-report');
      try {
        const dataUrl = await htmlToImage.toPng(node, { backgroundColor: '#ffffff', pixelRatio: 2 });
        const link = document.createElement('a');
        link.download = 'Zenith-Report-' + calYear + '-' + calMonth + '.png';
        link.href = dataUrl;
        link.click();
      } catch (err) {
        console.error('Export failed:', err);
      } finally {
        exporting = false;
      }
    };

    navEl.addEventListener('click', (event) => {
      const button = event.target.closest('button[data-view]');
      if (button) {
        setView(button.dataset.view);
      }
    });

    document.body.addEventListener('click', (event) => {
      const removeHabit = event.target.closest('[data-remove]');
      if (removeHabit) {
        event.stopPropagation();
        mutate('/api/habits/' + removeHabit.dataset.remove, { method: 'DELETE' })
          .catch((err) => setStatus(err.message, 'error'));
        return;
      }
      const removeWealth = event.target.closest('[data-remove-wealth]');
      if (removeWealth) {
        mutate('/api/wealth/' + removeWealth.dataset.removeWealth, { method: 'DELETE' })
          .catch((err) => setStatus(err.message, 'error'));
        return;
      }
      const toggle = event.target.closest('[data-toggle]');
      if (toggle) {
        mutate('/api/habits/' + toggle.dataset.toggle + '/toggle', jsonBody({ date: TODAY }))
          .catch((err) => setStatus(err.message, 'error'));
      }
    });

    document.getElementById('habit-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const nameEl = document.getElementById('habit-name');
      const catEl = document.getElementById('habit-cat');
      const errorEl = document.getElementById('habit-error');
      const fieldEl = document.getElementById('habit-name-field');
      errorEl.textContent = '';
      fieldEl.classList.remove('invalid');
      mutate('/api/habits', jsonBody({ name: nameEl.value, category: catEl.value }))
        .then(() => {
          nameEl.value = '';
          catEl.value = '';
          setStatus('Habit added');
        })
        .catch((err) => {
          if (err.status === 400) {
            errorEl.textContent = err.message;
            fieldEl.classList.add('invalid');
          } else {
            setStatus(err.message, 'error');
          }
        });
    });

    document.getElementById('wealth-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const descEl = document.getElementById('wealth-desc');
      const catEl = document.getElementById('wealth-cat');
      const amtEl = document.getElementById('wealth-amt');
      const descErrorEl = document.getElementById('wealth-desc-error');
      const amtErrorEl = document.getElementById('wealth-amt-error');
      descErrorEl.textContent = '';
      amtErrorEl.textContent = '';
      document.getElementById('wealth-desc-field').classList.remove('invalid');
      document.getElementById('wealth-amt-field').classList.remove('invalid');

      const amount = parseFloat(amtEl.value);
      if (Number.isNaN(amount) || amount === 0) {
        amtErrorEl.textContent = 'amount must be a non-zero number';
        document.getElementById('wealth-amt-field').classList.add('invalid');
        return;
      }
      mutate('/api/wealth', jsonBody({ description: descEl.value, category: catEl.value, amount }))
        .then(() => {
          descEl.value = '';
          catEl.value = '';
          amtEl.value = '';
          setStatus('Entry saved');
        })
        .catch((err) => {
          if (err.status === 400) {
            descErrorEl.textContent = err.message;
            document.getElementById('wealth-desc-field').classList.add('invalid');
          } else {
            setStatus(err.message, 'error');
          }
        });
    });

    document.getElementById('health-sliders').addEventListener('change', (event) => {
      const input = event.target.closest('input[data-field]');
      if (!input) {
        return;
      }
      const field = input.dataset.field;
      const value = field === 'steps' ? parseInt(input.value, 10) : parseFloat(input.value);
      mutate('/api/health/' + TODAY, {
        method: 'PUT',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ field, value }),
      }).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('health-notes').addEventListener('change', (event) => {
      mutate('/api/health/' + TODAY, {
        method: 'PUT',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ field: 'notes', value: event.target.value }),
      }).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('cal-prev').addEventListener('click', () => {
      calMonth -= 1;
      if (calMonth === 0) {
        calMonth = 12;
        calYear -= 1;
      }
      refreshCalendar().catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('cal-next').addEventListener('click', () => {
      calMonth += 1;
      if (calMonth === 13) {
        calMonth = 1;
        calYear += 1;
      }
      refreshCalendar().catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('export-btn').addEventListener('click', () => {
      exportReport();
    });

    loadState().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
