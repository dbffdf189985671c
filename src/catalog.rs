//! Built-in quest packs. Catalog entries are immutable at runtime;
//! quests snapshot the point reward at creation so edits here never
//! alter in-flight quests.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::Points;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackCategory {
    Mixed,
    Creative,
    LifeSkills,
    Learning,
    Adventure,
    Social,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub icon: String,
    pub difficulty: Difficulty,
    pub reward: Points,
    pub time_estimate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pack {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: PackCategory,
    pub challenges: Vec<Challenge>,
}

struct ChallengeDef {
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    instructions: Option<&'static str>,
    icon: &'static str,
    difficulty: Difficulty,
    reward: i32,
    time_estimate: &'static str,
}

struct PackDef {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    category: PackCategory,
    challenges: &'static [ChallengeDef],
}

const fn ch(
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    difficulty: Difficulty,
    reward: i32,
    time_estimate: &'static str,
) -> ChallengeDef {
    ChallengeDef {
        slug,
        title,
        description,
        instructions: None,
        icon,
        difficulty,
        reward,
        time_estimate,
    }
}

const fn ch_guided(
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    instructions: &'static str,
    icon: &'static str,
    difficulty: Difficulty,
    reward: i32,
    time_estimate: &'static str,
) -> ChallengeDef {
    ChallengeDef {
        slug,
        title,
        description,
        instructions: Some(instructions),
        icon,
        difficulty,
        reward,
        time_estimate,
    }
}

use Difficulty::{Easy, Hard, Medium};

const PACK_DEFS: &[PackDef] = &[
    PackDef {
        slug: "starter-pack",
        name: "Starter Pack",
        description: "A mix of fun challenges to get started. Perfect first quests!",
        icon: "⭐",
        category: PackCategory::Mixed,
        challenges: &[
            ch(
                "make-your-bed-7-days",
                "Bed Boss",
                "Make your bed every morning for 7 days in a row!",
                "🛏️",
                Easy,
                30,
                "1 week",
            ),
            ch(
                "try-new-food",
                "Brave Bite",
                "Try a new food you've never eaten before. One real bite!",
                "🍽️",
                Easy,
                20,
                "1 day",
            ),
            ch(
                "learn-joke",
                "Joke Teller",
                "Learn a joke and tell it to 3 different people!",
                "😂",
                Easy,
                20,
                "1 day",
            ),
            ch(
                "help-without-asking",
                "Secret Helper",
                "Do something helpful without being asked. Surprise someone!",
                "🦸",
                Easy,
                20,
                "1 day",
            ),
            ch(
                "read-new-book",
                "Book Explorer",
                "Read a book you've never read before (or have someone read it to you).",
                "📚",
                Easy,
                20,
                "1 day",
            ),
            ch(
                "draw-family",
                "Family Portrait",
                "Draw a picture of your family. Include everyone!",
                "👨‍👩‍👧",
                Easy,
                20,
                "30 minutes",
            ),
            ch(
                "learn-5-words",
                "Word Collector",
                "Learn 5 new words this week. Use each one in a sentence!",
                "📝",
                Medium,
                30,
                "1 week",
            ),
            ch(
                "clean-room",
                "Room Rescue",
                "Clean your whole room without any reminders!",
                "✨",
                Medium,
                30,
                "1 hour",
            ),
            ch(
                "compliment-spree",
                "Kindness Quest",
                "Give 5 genuine compliments to different people today!",
                "💝",
                Easy,
                20,
                "1 day",
            ),
            ch(
                "morning-routine-solo",
                "Morning Champion",
                "Do your whole morning routine by yourself for 3 days!",
                "🌅",
                Medium,
                40,
                "3 days",
            ),
        ],
    },
    PackDef {
        slug: "art-adventures",
        name: "Art Adventures",
        description: "Creative challenges for little artists. Draw, paint, build, create!",
        icon: "🎨",
        category: PackCategory::Creative,
        challenges: &[
            ch(
                "monster-maker",
                "Monster Maker",
                "Design your own monster! Give it a name and special powers.",
                "👹",
                Easy,
                20,
                "30 minutes",
            ),
            ch(
                "nature-art",
                "Nature Artist",
                "Make art using only things from outside - leaves, sticks, rocks!",
                "🍂",
                Medium,
                30,
                "1 hour",
            ),
            ch(
                "cardboard-creation",
                "Box Builder",
                "Build something cool from cardboard boxes. Robot? Castle? Spaceship?",
                "📦",
                Medium,
                40,
                "2 hours",
            ),
            ch(
                "self-portrait",
                "Mirror Me",
                "Look in a mirror and draw yourself! Try to get the details right.",
                "🪞",
                Medium,
                30,
                "30 minutes",
            ),
            ch(
                "color-mixing",
                "Color Scientist",
                "Mix paints to create 5 new colors. Name each one!",
                "🌈",
                Easy,
                20,
                "30 minutes",
            ),
            ch(
                "comic-strip",
                "Comic Creator",
                "Draw a comic strip with at least 4 panels. Tell a story!",
                "💭",
                Hard,
                50,
                "1 hour",
            ),
            ch(
                "gift-art",
                "Gift of Art",
                "Make a piece of art as a gift for someone. Give it to them!",
                "🎁",
                Medium,
                30,
                "1 hour",
            ),
            ch(
                "playdough-zoo",
                "Dough Zoo",
                "Make 5 different animals out of playdough or clay.",
                "🦁",
                Medium,
                30,
                "45 minutes",
            ),
        ],
    },
    PackDef {
        slug: "life-skills",
        name: "Life Skills",
        description: "Real-world skills that last a lifetime. Learn by doing!",
        icon: "🌟",
        category: PackCategory::LifeSkills,
        challenges: &[
            ch_guided(
                "write-letter",
                "Letter Writer",
                "Write a letter to a grandparent or relative. Address the envelope and mail it!",
                "1. Write your letter (draw pictures too!)\n2. Put it in an envelope\n3. Write the address on the front\n4. Put a stamp on it\n5. Mail it together!",
                "✉️",
                Medium,
                40,
                "1 hour",
            ),
            ch(
                "make-breakfast",
                "Breakfast Chef",
                "Make breakfast for yourself (with a grown-up nearby for safety).",
                "🍳",
                Medium,
                30,
                "30 minutes",
            ),
            ch(
                "learn-phone-number",
                "Memory Master",
                "Memorize a parent's phone number. Recite it from memory!",
                "📱",
                Medium,
                30,
                "1 week",
            ),
            ch(
                "tie-shoes",
                "Lace Ace",
                "Learn to tie your shoes by yourself. Do it 3 times in a row!",
                "👟",
                Hard,
                50,
                "1 week",
            ),
            ch(
                "set-table",
                "Table Setter",
                "Set the table for dinner every night for a week. All by yourself!",
                "🍽️",
                Easy,
                30,
                "1 week",
            ),
            ch_guided(
                "simple-recipe",
                "Recipe Reader",
                "Follow a simple recipe to make a snack. Read each step!",
                "Pick a simple recipe like:\n- Ants on a log (celery + peanut butter + raisins)\n- Fruit salad\n- Trail mix\n- Smoothie",
                "📖",
                Medium,
                30,
                "30 minutes",
            ),
            ch(
                "fold-laundry",
                "Fold Master",
                "Fold a whole basket of laundry. Make it neat!",
                "👕",
                Medium,
                30,
                "30 minutes",
            ),
            ch(
                "address-intro",
                "Address Expert",
                "Learn your full home address. Recite it from memory!",
                "🏠",
                Medium,
                30,
                "1 week",
            ),
        ],
    },
    PackDef {
        slug: "brain-games",
        name: "Brain Games",
        description: "Puzzles, riddles, and learning challenges to grow your brain!",
        icon: "🧠",
        category: PackCategory::Learning,
        challenges: &[
            ch_guided(
                "memorize-poem",
                "Poem Master",
                "Memorize a short poem and recite it to your family!",
                "Pick a poem that's 4-8 lines long. Practice a little each day. When you're ready, perform it!",
                "📜",
                Medium,
                40,
                "1 week",
            ),
            ch_guided(
                "teach-game",
                "Game Teacher",
                "Learn a new game, then teach it to someone else!",
                "1. Learn a card game, board game, or outdoor game\n2. Practice until you know the rules well\n3. Teach it to a family member or friend\n4. Play it together!",
                "🎲",
                Medium,
                40,
                "3 days",
            ),
            ch(
                "riddle-collector",
                "Riddle Riddler",
                "Learn 3 riddles and stump your family with them!",
                "❓",
                Easy,
                20,
                "1 day",
            ),
            ch(
                "counting-challenge",
                "Count Master",
                "Count to 100 out loud without any mistakes!",
                "🔢",
                Easy,
                20,
                "15 minutes",
            ),
            ch(
                "puzzle-complete",
                "Puzzle Pro",
                "Complete a jigsaw puzzle by yourself. At least 50 pieces!",
                "🧩",
                Medium,
                30,
                "2 hours",
            ),
            ch_guided(
                "science-question",
                "Wonder Asker",
                "Ask a 'why' or 'how' question about the world. Research the answer together!",
                "Think of something you're curious about:\n- Why is the sky blue?\n- How do planes fly?\n- Why do we dream?\n\nLook up the answer with a grown-up and explain what you learned!",
                "🔬",
                Medium,
                30,
                "1 hour",
            ),
            ch(
                "backwards-alphabet",
                "Alphabet Ace",
                "Say the alphabet backwards without looking!",
                "🔤",
                Hard,
                50,
                "1 week",
            ),
            ch(
                "memory-game",
                "Memory Champ",
                "Beat a family member at a memory matching game 3 times!",
                "🃏",
                Medium,
                30,
                "1 week",
            ),
        ],
    },
];

static PACKS: Lazy<Vec<Pack>> = Lazy::new(|| {
    PACK_DEFS
        .iter()
        .map(|p| Pack {
            slug: p.slug.to_string(),
            name: p.name.to_string(),
            description: p.description.to_string(),
            icon: p.icon.to_string(),
            category: p.category,
            challenges: p
                .challenges
                .iter()
                .map(|c| Challenge {
                    slug: c.slug.to_string(),
                    title: c.title.to_string(),
                    description: c.description.to_string(),
                    instructions: c.instructions.map(str::to_string),
                    icon: c.icon.to_string(),
                    difficulty: c.difficulty,
                    reward: Points(c.reward),
                    time_estimate: c.time_estimate.to_string(),
                })
                .collect(),
        })
        .collect()
});

pub fn all_packs() -> &'static [Pack] {
    &PACKS
}

pub fn get_pack(slug: &str) -> Option<&'static Pack> {
    PACKS.iter().find(|p| p.slug == slug)
}

pub fn get_challenge(pack_slug: &str, challenge_slug: &str) -> Option<&'static Challenge> {
    get_pack(pack_slug)?
        .challenges
        .iter()
        .find(|c| c.slug == challenge_slug)
}

pub fn all_challenges() -> impl Iterator<Item = (&'static Pack, &'static Challenge)> {
    PACKS
        .iter()
        .flat_map(|pack| pack.challenges.iter().map(move |c| (pack, c)))
}
