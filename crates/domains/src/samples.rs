//! Articles inserted into an empty store at boot, in both storage modes.

use crate::delimited::DelimitedList;
use crate::models::PostDraft;

struct Sample {
    title: &'static str,
    subtitle: &'static str,
    content: &'static str,
    tags: &'static str,
    links: &'static str,
}

const SAMPLES: [Sample; 3] = [
    Sample {
        title: "The Significance of Griha Pravesh Puja: Blessing Your New Home",
        subtitle: "Discover the profound meaning behind the traditional house warming ceremony and how it creates positive energy in your new dwelling according to Vastu principles.",
        content: "<h2>Introduction</h2><p>Griha Pravesh Puja is one of the most important ceremonies in Hindu tradition when moving into a new home. This sacred ritual not only blesses the dwelling but also ensures the removal of negative energies and invites prosperity, peace, and happiness for the family.</p><h3>Why Griha Pravesh Puja?</h3><p>According to Vastu Shastra, every piece of land has its own energy field. When we build a house on it, we need to harmonize these energies with our own. Griha Pravesh Puja helps in:</p><ul><li>Removing negative energies from the land</li><li>Inviting positive vibrations</li><li>Blessing the family with prosperity</li><li>Ensuring peace and harmony</li></ul><h2>The Ritual Process</h2><p>The ceremony involves several steps including purification, invocation of deities, and specific mantras for different areas of the house.</p>",
        tags: "Griha Pravesh, Vastu, Home Blessing, Puja",
        links: "https://en.wikipedia.org/wiki/Griha_Pravesh, https://www.vaastu-shastra.com/",
    },
    Sample {
        title: "Understanding the Sacred Marriage Rituals in Hindu Tradition",
        subtitle: "Explore the deep spiritual significance of Hindu wedding ceremonies and how each ritual contributes to a blessed and harmonious married life.",
        content: "<h2>The Sacred Union</h2><p>Hindu marriage is not just a union of two individuals but a sacred bond that connects two souls and families. Each ritual in a Hindu wedding has profound spiritual significance that goes beyond the physical ceremony.</p><h3>Key Rituals</h3><ul><li><strong>Kanyadaan:</strong> The giving away of the bride</li><li><strong>Saptapadi:</strong> Seven sacred steps around the fire</li><li><strong>Mangalsutra:</strong> Sacred thread symbolizing marriage</li><li><strong>Vivah Homa:</strong> Sacred fire ceremony</li></ul><h2>Spiritual Significance</h2><p>These rituals are designed to create a strong spiritual foundation for the couple, ensuring their journey together is blessed and harmonious.</p>",
        tags: "Marriage, Vivah, Saptapadi, Hindu Wedding, Rituals",
        links: "https://en.wikipedia.org/wiki/Hindu_wedding, https://www.hinduismtoday.com/",
    },
    Sample {
        title: "Ganesh Chaturthi: The Festival of New Beginnings",
        subtitle: "Learn about the importance of Lord Ganesha in Hindu culture and how Ganesh Chaturthi celebrations bring prosperity and remove obstacles.",
        content: "<h2>Lord Ganesha</h2><p>Lord Ganesha, the remover of obstacles and the patron of arts and sciences, holds a special place in Hindu hearts. Ganesh Chaturthi celebrates his birth and is one of the most important festivals in Hindu culture.</p><h3>Festival Celebrations</h3><p>The festival involves:</p><ul><li>Installing Ganesha idols in homes and public places</li><li>Daily prayers and offerings</li><li>Cultural programs and community celebrations</li><li>Immersion ceremony (Visarjan)</li></ul><h2>Benefits of Celebration</h2><p>Celebrating Ganesh Chaturthi brings:</p><ul><li>Removal of obstacles in life</li><li>Success in new ventures</li><li>Wisdom and knowledge</li><li>Family prosperity</li></ul>",
        tags: "Ganesh, Chaturthi, Festival, Hindu Culture, Lord Ganesha",
        links: "https://en.wikipedia.org/wiki/Ganesh_Chaturthi, https://www.ganeshchaturthi.com/",
    },
];

/// The three starter articles, in insertion order.
pub fn sample_posts() -> Vec<PostDraft> {
    SAMPLES
        .iter()
        .map(|s| PostDraft {
            title: s.title.to_string(),
            subtitle: Some(s.subtitle.to_string()),
            content: s.content.to_string(),
            tags: DelimitedList::parse(s.tags),
            links: DelimitedList::parse(s.links),
            featured_image: None,
        })
        .collect()
}
