use crate::dashboard::{ActivityCard, Dashboard, STREAK_GOAL, WATER_GOAL};

pub fn render_index(date: &str, dashboard: &Dashboard) -> String {
    let water_pct = u16::from(dashboard.water_count()) * 100 / u16::from(WATER_GOAL);
    let streak_pct = u16::from(dashboard.week_streak()) * 100 / u16::from(STREAK_GOAL);
    let weight = dashboard.weight_loss_pct();

    let cards = dashboard
        .cards()
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n");

    let avatar = match dashboard.profile_image() {
        Some(image) => format!(r#"<img id="avatar-img" src="{image}" alt="Profile" />"#),
        None => r#"<span class="avatar-fallback">A</span>"#.to_string(),
    };

    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{WATER}}", &dashboard.water_count().to_string())
        .replace("{{WATER_PCT}}", &water_pct.to_string())
        .replace("{{WEIGHT}}", &format!("{weight:.1}"))
        .replace("{{WEIGHT_PCT}}", &format!("{weight}"))
        .replace("{{STREAK}}", &dashboard.week_streak().to_string())
        .replace("{{STREAK_PCT}}", &streak_pct.to_string())
        .replace("{{AVATAR}}", &avatar)
        .replace("{{CARDS}}", &cards)
}

fn render_card(card: &ActivityCard) -> String {
    CARD_HTML
        .replace("{{SLUG}}", &card.slug)
        .replace("{{TITLE}}", &card.title)
        .replace("{{CURRENT}}", &card.current)
        .replace("{{TARGET}}", &card.target)
        .replace("{{PROGRESS}}", &card.progress.to_string())
}

const CARD_HTML: &str = r#"<article class="activity" data-slug="{{SLUG}}">
        <div class="activity-head">
          <h3>{{TITLE}}</h3>
          <p class="subtitle">{{CURRENT}}</p>
        </div>
        <div class="activity-progress">
          <div class="bar-row">
            <span>Progress</span>
            <span class="activity-value">{{PROGRESS}}%</span>
          </div>
          <div class="bar"><div class="bar-fill activity-fill" style="width: {{PROGRESS}}%"></div></div>
          <p class="subtitle">{{TARGET}}</p>
          <p class="tap-hint">Click to add progress</p>
        </div>
      </article>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fitness Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef7fb;
      --bg-2: #c9ecf7;
      --ink: #22313a;
      --accent: #0ea5e9;
      --accent-soft: #e0f4fd;
      --good: #4ade80;
      --gold: #facc15;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(14, 116, 144, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f3fbff 60%, #eef6f9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1060px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      align-items: center;
      gap: 18px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.6rem, 3vw, 2.2rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5d6b73;
      font-size: 0.95rem;
    }

    .avatar {
      position: relative;
      width: 72px;
      height: 72px;
      border-radius: 50%;
      border: 3px solid var(--accent);
      overflow: hidden;
      display: grid;
      place-items: center;
      background: var(--accent-soft);
      flex-shrink: 0;
    }

    .avatar img {
      width: 100%;
      height: 100%;
      object-fit: cover;
    }

    .avatar-fallback {
      font-size: 1.8rem;
      font-weight: 600;
      color: var(--accent);
    }

    .avatar label {
      position: absolute;
      inset: 0;
      display: grid;
      place-items: center;
      background: rgba(34, 49, 58, 0.45);
      color: white;
      font-size: 0.7rem;
      opacity: 0;
      cursor: pointer;
      transition: opacity 150ms ease;
    }

    .avatar:hover label {
      opacity: 1;
    }

    .avatar input {
      display: none;
    }

    .goals {
      display: grid;
      gap: 18px;
    }

    .bar-row {
      display: flex;
      justify-content: space-between;
      margin-bottom: 6px;
      font-weight: 500;
    }

    .bar {
      height: 12px;
      background: rgba(34, 49, 58, 0.14);
      border-radius: 999px;
      overflow: hidden;
    }

    .bar-fill {
      height: 100%;
      background: var(--good);
      border-radius: 999px;
      transition: width 300ms ease;
    }

    .split {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 16px;
    }

    .tile {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(14, 116, 144, 0.1);
    }

    .ring-tile {
      display: grid;
      justify-items: center;
      gap: 10px;
    }

    .ring-tile h3 {
      margin: 0;
      justify-self: start;
    }

    .ring {
      width: 150px;
      height: 150px;
      border-radius: 50%;
      display: grid;
      place-items: center;
      background: conic-gradient(var(--accent) 0% {{WEIGHT_PCT}}%, #e5e7eb {{WEIGHT_PCT}}% 100%);
    }

    .ring-inner {
      width: 114px;
      height: 114px;
      border-radius: 50%;
      background: white;
      display: grid;
      place-items: center;
      font-size: 1.4rem;
      font-weight: 600;
      color: var(--accent);
    }

    .water-tile {
      background: linear-gradient(120deg, #0ea5e9, #38bdf8);
      color: white;
      border: none;
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 14px;
      cursor: pointer;
      transition: box-shadow 150ms ease;
    }

    .water-tile:hover {
      box-shadow: 0 14px 30px rgba(14, 165, 233, 0.4);
    }

    .water-tile h3 {
      margin: 0 0 4px;
    }

    .water-tile .subtitle {
      color: rgba(255, 255, 255, 0.85);
    }

    .water-controls {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .water-controls form {
      display: contents;
    }

    .water-controls button {
      appearance: none;
      border: none;
      border-radius: 50%;
      width: 34px;
      height: 34px;
      font-size: 1.1rem;
      font-weight: 600;
      color: white;
      background: rgba(255, 255, 255, 0.25);
      cursor: pointer;
    }

    .water-controls button:active {
      transform: scale(0.95);
    }

    .water-count {
      width: 58px;
      height: 58px;
      border-radius: 50%;
      background: rgba(255, 255, 255, 0.3);
      display: grid;
      place-items: center;
      font-size: 1.4rem;
      font-weight: 600;
    }

    .leaders {
      display: grid;
      gap: 12px;
      text-align: center;
    }

    .leaders h3 {
      margin: 0;
      text-align: left;
    }

    .leader {
      display: grid;
      justify-items: center;
      gap: 2px;
    }

    .leader-avatar {
      width: 56px;
      height: 56px;
      border-radius: 50%;
      display: grid;
      place-items: center;
      font-weight: 600;
      font-size: 1.2rem;
      color: white;
    }

    .leader-avatar.first {
      width: 68px;
      height: 68px;
      background: linear-gradient(135deg, #f59e0b, var(--gold));
      border: 3px solid var(--gold);
    }

    .leader-avatar.second {
      background: #60a5fa;
    }

    .leader-avatar.third {
      background: #4ade80;
    }

    .leader-name {
      font-weight: 600;
      margin-top: 4px;
    }

    .leader-score {
      font-weight: 600;
    }

    .leader-score.gold { color: #eab308; }
    .leader-score.blue { color: #60a5fa; }
    .leader-score.green { color: #4ade80; }

    .leader-handle {
      color: #97a3aa;
      font-size: 0.75rem;
    }

    .runners-up {
      display: flex;
      justify-content: space-around;
    }

    .activities {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 16px;
    }

    .activity {
      background: var(--accent-soft);
      border-radius: 24px;
      padding: 22px;
      cursor: pointer;
      transition: box-shadow 150ms ease;
    }

    .activity:hover {
      box-shadow: 0 10px 24px rgba(14, 165, 233, 0.25);
    }

    .activity h3 {
      margin: 0;
      color: #0284c7;
    }

    .activity .bar {
      height: 8px;
      background: rgba(34, 49, 58, 0.18);
    }

    .activity-fill {
      background: var(--accent);
    }

    .activity-value {
      color: #0284c7;
      font-weight: 600;
    }

    .activity-progress {
      margin-top: 16px;
    }

    .tap-hint {
      margin: 8px 0 0;
      font-size: 0.78rem;
      color: #0284c7;
    }

    .status {
      font-size: 0.95rem;
      color: #5d6b73;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #6f7a81;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div class="avatar" id="avatar">
        {{AVATAR}}
        <label for="profile-upload">Change</label>
        <input id="profile-upload" type="file" accept="image/*" />
      </div>
      <div>
        <h1>AYUSH</h1>
        <p class="subtitle">Joined 4 months ago &middot; <span id="date">{{DATE}}</span></p>
      </div>
    </header>

    <section class="goals">
      <div>
        <div class="bar-row">
          <span>Weight loss Goal</span>
          <span id="weight-value">{{WEIGHT}}%</span>
        </div>
        <div class="bar"><div class="bar-fill" id="weight-bar" style="width: {{WEIGHT_PCT}}%"></div></div>
      </div>
      <div>
        <div class="bar-row">
          <span>Daily water goal</span>
          <span><span id="water-value">{{WATER}}</span>/10</span>
        </div>
        <div class="bar"><div class="bar-fill" id="water-bar" style="width: {{WATER_PCT}}%"></div></div>
      </div>
      <div>
        <div class="bar-row">
          <span>Week Streak</span>
          <span><span id="streak-value">{{STREAK}}</span>/7</span>
        </div>
        <div class="bar"><div class="bar-fill" id="streak-bar" style="width: {{STREAK_PCT}}%"></div></div>
      </div>
    </section>

    <section class="split">
      <div class="tile ring-tile">
        <h3>Weight loss Goal</h3>
        <p class="subtitle">Loss: 5kg / Month</p>
        <div class="ring" id="ring">
          <div class="ring-inner"><span id="ring-value">{{WEIGHT}}%</span></div>
        </div>
        <p class="subtitle">Progress updates in real-time</p>
      </div>

      <div class="tile water-tile" id="water-card">
        <div>
          <h3>Water</h3>
          <p class="subtitle">Click to add a cup</p>
        </div>
        <div class="water-controls">
          <form id="water-sub-form" method="post" action="/water/sub">
            <button type="submit" aria-label="Remove a cup">&minus;</button>
          </form>
          <div class="water-count" id="water-count">{{WATER}}</div>
          <form id="water-add-form" method="post" action="/water/add">
            <button type="submit" aria-label="Add a cup">+</button>
          </form>
        </div>
      </div>

      <div class="tile leaders">
        <h3>Leaderboard</h3>
        <div class="leader">
          <div class="leader-avatar first">E</div>
          <span class="leader-name">Eiden</span>
          <span class="leader-score gold">2430</span>
          <span class="leader-handle">@username</span>
        </div>
        <div class="runners-up">
          <div class="leader">
            <div class="leader-avatar second">J</div>
            <span class="leader-name">Jackson</span>
            <span class="leader-score blue">1847</span>
            <span class="leader-handle">@username</span>
          </div>
          <div class="leader">
            <div class="leader-avatar third">E</div>
            <span class="leader-name">Emma Aria</span>
            <span class="leader-score green">1674</span>
            <span class="leader-handle">@username</span>
          </div>
        </div>
      </div>
    </section>

    <section class="activities" id="activities">
      {{CARDS}}
    </section>

    <div class="status" id="status"></div>
    <p class="hint">Water clamps at 10 cups and the streak at 7 days. Weight loss advances on a server timer.</p>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const waterValueEl = document.getElementById('water-value');
    const waterBarEl = document.getElementById('water-bar');
    const waterCountEl = document.getElementById('water-count');
    const weightValueEl = document.getElementById('weight-value');
    const weightBarEl = document.getElementById('weight-bar');
    const ringEl = document.getElementById('ring');
    const ringValueEl = document.getElementById('ring-value');
    const streakValueEl = document.getElementById('streak-value');
    const streakBarEl = document.getElementById('streak-bar');
    const avatarEl = document.getElementById('avatar');
    const uploadEl = document.getElementById('profile-upload');
    const waterCardEl = document.getElementById('water-card');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const flashSaved = () => {
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    const applyWater = (count) => {
      waterValueEl.textContent = count;
      waterCountEl.textContent = count;
      waterBarEl.style.width = `${count * 10}%`;
    };

    const applyWeight = (pct) => {
      weightValueEl.textContent = `${pct.toFixed(1)}%`;
      ringValueEl.textContent = `${pct.toFixed(1)}%`;
      weightBarEl.style.width = `${pct}%`;
      ringEl.style.background = `conic-gradient(#0ea5e9 0% ${pct}%, #e5e7eb ${pct}% 100%)`;
    };

    const applyStreak = (streak) => {
      streakValueEl.textContent = streak;
      streakBarEl.style.width = `${(streak / 7) * 100}%`;
    };

    const applyCard = (slug, progress) => {
      const card = document.querySelector(`.activity[data-slug="${slug}"]`);
      if (!card) {
        return;
      }
      card.querySelector('.activity-value').textContent = `${progress}%`;
      card.querySelector('.activity-fill').style.width = `${progress}%`;
    };

    const applyAvatar = (image) => {
      if (!image) {
        return;
      }
      let img = document.getElementById('avatar-img');
      if (!img) {
        const fallback = avatarEl.querySelector('.avatar-fallback');
        if (fallback) {
          fallback.remove();
        }
        img = document.createElement('img');
        img.id = 'avatar-img';
        img.alt = 'Profile';
        avatarEl.prepend(img);
      }
      img.src = image;
    };

    const refresh = async () => {
      const res = await fetch('/api/dashboard');
      if (!res.ok) {
        throw new Error('Unable to load dashboard');
      }
      const data = await res.json();
      document.getElementById('date').textContent = data.date;
      applyWater(data.water_count);
      applyWeight(data.weight_loss_pct);
      applyStreak(data.week_streak);
      data.cards.forEach((card) => applyCard(card.slug, card.progress));
      applyAvatar(data.profile_image);
    };

    const sendWater = async (action) => {
      setStatus('Saving...', 'info');
      const res = await fetch('/api/water', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ action })
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      const data = await res.json();
      applyWater(data.water_count);
      applyStreak(data.week_streak);
      flashSaved();
    };

    const sendAdvance = async (slug) => {
      setStatus('Saving...', 'info');
      const res = await fetch(`/api/activity/${slug}/advance`, { method: 'POST' });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      const data = await res.json();
      applyCard(data.slug, data.progress);
      applyStreak(data.week_streak);
      flashSaved();
    };

    const uploadProfileImage = async (file) => {
      setStatus('Uploading...', 'info');
      const form = new FormData();
      form.append('image', file);
      const res = await fetch('/api/profile/image', { method: 'POST', body: form });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Upload failed');
      }
      const data = await res.json();
      applyAvatar(data.image);
      flashSaved();
    };

    waterCardEl.addEventListener('click', () => {
      sendWater('add').catch((err) => setStatus(err.message, 'error'));
    });

    const addForm = document.getElementById('water-add-form');
    const subForm = document.getElementById('water-sub-form');

    // without JS the forms fall through to the redirect routes
    addForm.addEventListener('click', (event) => event.stopPropagation());
    subForm.addEventListener('click', (event) => event.stopPropagation());

    addForm.addEventListener('submit', (event) => {
      event.preventDefault();
      sendWater('add').catch((err) => setStatus(err.message, 'error'));
    });

    subForm.addEventListener('submit', (event) => {
      event.preventDefault();
      sendWater('sub').catch((err) => setStatus(err.message, 'error'));
    });

    document.querySelectorAll('.activity').forEach((card) => {
      card.addEventListener('click', () => {
        sendAdvance(card.dataset.slug).catch((err) => setStatus(err.message, 'error'));
      });
    });

    uploadEl.addEventListener('change', () => {
      const file = uploadEl.files && uploadEl.files[0];
      if (!file) {
        return;
      }
      uploadProfileImage(file).catch((err) => setStatus(err.message, 'error'));
    });

    // keep the weight ring live against the server-side timer
    setInterval(() => {
      refresh().catch(() => {});
    }, 15000);
  </script>
</body>
</html>
"#;
