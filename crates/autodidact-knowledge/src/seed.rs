// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bootstrap corpus loaded when durable storage is empty.

use autodidact_core::{KnowledgeEntry, Language};

/// `(question, answer, category, language)` rows of the bootstrap corpus.
const SEED: &[(&str, &str, &str, Language)] = &[
    (
        "hi",
        "Hey! I can help with Roblox Lua scripting, GUI, and executors!",
        "greeting",
        Language::En,
    ),
    (
        "hello",
        "Hello! Ready to learn Roblox scripting?",
        "greeting",
        Language::En,
    ),
    (
        "how are you",
        "I'm doing great! How can I help with Roblox?",
        "greeting",
        Language::En,
    ),
    (
        "thanks",
        "You're welcome! Happy to help!",
        "greeting",
        Language::En,
    ),
    (
        "thank you",
        "No problem! Ask me anything about Roblox!",
        "greeting",
        Language::En,
    ),
    (
        "kamusta",
        "Kumusta! Ano'ng matutulungan ko sa Roblox?",
        "greeting",
        Language::Tl,
    ),
    (
        "kumusta ka",
        "Ayos lang ako! May tanong ka ba?",
        "greeting",
        Language::Tl,
    ),
    ("salamat", "Walang anuman!", "greeting", Language::Tl),
    (
        "what is lua",
        "Lua is a lightweight scripting language. Roblox uses Lua 5.1 for game scripting. It's simple yet powerful!",
        "lua_basics",
        Language::En,
    ),
    (
        "how to create variable in lua",
        "In Lua: local myVar = 10 for numbers, local name = 'John' for strings. Always use 'local' for better performance!",
        "lua_basics",
        Language::En,
    ),
    (
        "what is table in lua",
        "Tables are Lua's main data structure. Example: local myTable = {1, 2, 3} or local player = {name = 'John', age = 25}. Access with myTable[1] or player.name",
        "lua_basics",
        Language::En,
    ),
    (
        "lua function example",
        "function greet(name)\n  print('Hello ' .. name)\nend\n\ngreet('Player')",
        "lua_basics",
        Language::En,
    ),
    (
        "lua loop example",
        "for i = 1, 10 do\n  print(i)\nend\n\nwhile condition do\n  -- code\nend\n\nfor key, value in pairs(table) do\n  print(key, value)\nend",
        "lua_basics",
        Language::En,
    ),
    (
        "what is localscript",
        "LocalScript runs on the client (player's computer). Use for UI, camera controls, and client-side actions. Put in StarterPlayerScripts or GUI objects.",
        "roblox_scripting",
        Language::En,
    ),
    (
        "what is script vs localscript",
        "Script = Server-side (controls game logic)\nLocalScript = Client-side (handles UI/input)\nModuleScript = Reusable code\n\nUse Script for game mechanics, LocalScript for player stuff!",
        "roblox_scripting",
        Language::En,
    ),
    (
        "how to make part in roblox",
        "local part = Instance.new('Part')\npart.Size = Vector3.new(4, 1, 2)\npart.Position = Vector3.new(0, 10, 0)\npart.BrickColor = BrickColor.new('Bright red')\npart.Parent = workspace",
        "roblox_scripting",
        Language::En,
    ),
    (
        "how to detect player click",
        "local player = game.Players.LocalPlayer\nlocal mouse = player:GetMouse()\n\nmouse.Button1Down:Connect(function()\n  print('Clicked!')\nend)",
        "roblox_scripting",
        Language::En,
    ),
    (
        "what is remoteevent",
        "RemoteEvent allows client-server communication:\n\nServer to Client: event:FireClient(player, data)\nClient to Server: event:FireServer(data)\n\nListen: event.OnServerEvent:Connect(function(player, data) end)",
        "roblox_scripting",
        Language::En,
    ),
    (
        "how to create gui in roblox",
        "local gui = Instance.new('ScreenGui')\ngui.Parent = game.Players.LocalPlayer.PlayerGui\n\nlocal frame = Instance.new('Frame')\nframe.Size = UDim2.new(0, 200, 0, 100)\nframe.Position = UDim2.new(0.5, -100, 0.5, -50)\nframe.Parent = gui",
        "gui",
        Language::En,
    ),
    (
        "how to make button in roblox gui",
        "local button = Instance.new('TextButton')\nbutton.Size = UDim2.new(0, 150, 0, 50)\nbutton.Text = 'Click Me!'\nbutton.Parent = screenGui\n\nbutton.MouseButton1Click:Connect(function()\n  print('Clicked!')\nend)",
        "gui",
        Language::En,
    ),
    (
        "udim2 explained",
        "UDim2 is for GUI positioning:\n\nUDim2.new(scaleX, offsetX, scaleY, offsetY)\n\nScale = 0 to 1 (percentage)\nOffset = pixels\n\nExamples:\nUDim2.new(0.5, 0, 0.5, 0) -- Center\nUDim2.new(1, 0, 1, 0) -- Full screen",
        "gui",
        Language::En,
    ),
    (
        "what is roblox executor",
        "An executor runs Lua scripts in Roblox games. Popular ones: Synapse X, Script-Ware, KRNL. They inject code into the game client.",
        "executor",
        Language::En,
    ),
    (
        "loadstring in lua",
        "loadstring() compiles code from string:\n\nlocal code = 'print(\"Hello\")'\nloadstring(code)()\n\nUseful for executors to run dynamic code!",
        "executor",
        Language::En,
    ),
    (
        "getgenv explained",
        "getgenv() returns the global environment for executors. It persists across script runs:\n\ngetgenv().myVar = 'value'\n\nThe variable stays even after scripts end.",
        "executor",
        Language::En,
    ),
    (
        "paano gumawa ng script sa roblox",
        "Para gumawa ng script:\n1. Buksan Roblox Studio\n2. Explorer -> ServerScriptService\n3. Insert -> Script\n4. I-type ang code\n5. Test!",
        "roblox_scripting",
        Language::Tl,
    ),
    (
        "ano ang variable sa lua",
        "Ang variable ay nag-store ng data:\n\nlocal pangalan = 'Juan'\nlocal edad = 25\n\nGamitin ang 'local' para mas mabilis!",
        "lua_basics",
        Language::Tl,
    ),
];

/// The bootstrap entries, in insertion order, stamped with the current time.
pub fn bootstrap_entries() -> Vec<KnowledgeEntry> {
    SEED.iter()
        .map(|(question, answer, category, language)| {
            KnowledgeEntry::new(question, answer, category, *language)
        })
        .collect()
}
